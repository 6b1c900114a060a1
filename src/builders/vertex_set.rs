use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use super::{scan_data_lines, ScanOptions};
use crate::config::{LiteralPolicy, ResourceExtraction};
use crate::error::Result;
use crate::indexing::VertexSet;
use crate::parsing::{clean_resource, split_triple};
use crate::sources::TripleSource;

/// Collect the cleaned subject of every line into a [`VertexSet`].
pub fn generate_vertex_set<I>(lines: I, options: ScanOptions) -> Result<VertexSet>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut vertices = VertexSet::new();
    scan_data_lines(lines, options, |line_number, line| match split_triple(line) {
        Some((subject, _, _)) => {
            let name = clean_resource(
                subject,
                LiteralPolicy::Ignore,
                ResourceExtraction::StripDbpediaPrefix,
            );
            if !name.is_empty() {
                vertices.insert(&name);
            }
        }
        None => warn!(line_number, "skipping malformed triple"),
    })?;
    Ok(vertices)
}

/// Build the vertex set of `input` and store it at `output`.
pub fn build_vertex_set(input: &Path, output: &Path, options: ScanOptions) -> Result<VertexSet> {
    info!(input = %input.display(), output = %output.display(), "building vertex set");
    let started = Instant::now();

    let vertices = generate_vertex_set(TripleSource::open(input)?.lines(), options)?;
    vertices.save_to_file(output)?;

    info!(
        vertices = vertices.len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "vertex set done"
    );
    Ok(vertices)
}
