//! The per-file graph writer.
//!
//! A [`GraphWriter`] consumes the lines of one triple file and writes a vertex
//! record for every unseen resource and an edge record for every accepted triple.
//! The vertex dictionary and the tracked pairs travel in a [`GraphState`] that is
//! moved in and handed back in the [`WriteOutcome`], so a caller can feed the
//! same state to the next file of a run.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::{ConversionConfig, LiteralPolicy, MalformedLinePolicy};
use crate::core::Triple;
use crate::error::{Error, Result};
use crate::indexing::instance_types::instance_type_of;
use crate::indexing::{EdgePairSet, InstanceTypes, VertexDictionary};
use crate::parsing::clean_line;
use crate::storage::EdgeListSink;

/// Accepted triples grouped by their cleaned subject.
pub type TripleLog = HashMap<String, Vec<Triple>>;

/// State shared by all files of a run.
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    pub vertices: VertexDictionary,
    pub edge_pairs: EdgePairSet,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Choices that differ from one input file to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    /// Do not write an edge whose (source, destination) pair is already tracked.
    pub skip_duplicate_pairs: bool,
    /// Remember the pairs of written edges, subject to the global tracking policy.
    pub track_edges: bool,
}

/// What one file contributed, together with the updated state.
#[derive(Debug)]
pub struct WriteOutcome {
    /// Lines consumed after the header.
    pub lines_read: u64,
    /// Accepted triples per subject; empty unless collection is enabled.
    pub triples: TripleLog,
    pub state: GraphState,
    pub edges_written: u64,
    pub vertices_added: u64,
    pub self_loops_skipped: u64,
    pub malformed_lines: u64,
    pub orphan_vertices: u64,
}

#[derive(Default)]
struct Counters {
    edges_written: u64,
    vertices_added: u64,
    self_loops_skipped: u64,
    malformed_lines: u64,
    orphan_vertices: u64,
}

pub struct GraphWriter<'a> {
    config: &'a ConversionConfig,
    instance_types: Option<&'a InstanceTypes>,
}

impl<'a> GraphWriter<'a> {
    pub fn new(config: &'a ConversionConfig, instance_types: Option<&'a InstanceTypes>) -> Self {
        Self { config, instance_types }
    }

    /// Stream `lines` into `sink`.
    ///
    /// The first line is a header and is always skipped, as are lines starting
    /// with `#`. Reading stops once the configured line ceiling is passed. When
    /// orphan insertion is enabled, every instance-type name still without an id
    /// is written as a vertex after the last line.
    pub fn write_graph<I, W>(
        &self,
        lines: I,
        sink: &mut EdgeListSink<W>,
        state: GraphState,
        policy: FilePolicy,
    ) -> Result<WriteOutcome>
    where
        I: IntoIterator<Item = Result<String>>,
        W: Write,
    {
        let started = Instant::now();
        let mut state = state;
        let mut triples = TripleLog::new();
        let mut counters = Counters::default();
        let mut current_line: u64 = 0;

        for line in lines {
            let line = line?;
            if current_line != 0 && !line.starts_with('#') {
                self.process_line(
                    &line,
                    current_line,
                    &mut state,
                    &mut triples,
                    &mut counters,
                    sink,
                    policy,
                )?;
            }
            current_line += 1;

            if self.config.progress_interval > 0 && current_line % self.config.progress_interval == 0
            {
                info!(
                    lines = current_line,
                    elapsed_secs = started.elapsed().as_secs_f64(),
                    vertices = state.vertices.len(),
                    edges = counters.edges_written,
                    "progress"
                );
            }

            if self.config.line_limit().is_some_and(|limit| current_line > limit) {
                break;
            }
        }

        if self.config.add_orphan_vertices {
            if let Some(types) = self.instance_types {
                for name in types.names() {
                    if state.vertices.insert(name).is_some() {
                        sink.write_vertex(name, types.type_of(name))?;
                        counters.orphan_vertices += 1;
                    }
                }
                info!(orphans = counters.orphan_vertices, "added vertices from instance dictionary");
            }
        }

        sink.flush()?;
        info!(self_loops = counters.self_loops_skipped, "skipped self loops");

        Ok(WriteOutcome {
            lines_read: current_line.saturating_sub(1),
            triples,
            state,
            edges_written: counters.edges_written,
            vertices_added: counters.vertices_added,
            self_loops_skipped: counters.self_loops_skipped,
            malformed_lines: counters.malformed_lines,
            orphan_vertices: counters.orphan_vertices,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn process_line<W: Write>(
        &self,
        line: &str,
        line_number: u64,
        state: &mut GraphState,
        triples: &mut TripleLog,
        counters: &mut Counters,
        sink: &mut EdgeListSink<W>,
        policy: FilePolicy,
    ) -> Result<()> {
        let Some(triple) = clean_line(line, self.config.literals, self.config.extraction) else {
            return match self.config.malformed_lines {
                MalformedLinePolicy::Skip => {
                    warn!(line_number, line = line.trim_end(), "skipping malformed triple");
                    counters.malformed_lines += 1;
                    Ok(())
                }
                MalformedLinePolicy::Fail => Err(Error::MalformedLine {
                    line_number,
                    line: line.trim_end().to_string(),
                }),
            };
        };

        // Counted on the cleaned text before any filtering.
        let self_loop = triple.is_self_loop();
        if self_loop {
            counters.self_loops_skipped += 1;
        }

        if self.config.restrict_to_known_instances {
            if let Some(types) = self.instance_types {
                if !(types.contains(&triple.subject) && types.contains(&triple.object)) {
                    return Ok(());
                }
            }
        }

        let skip_destination = triple.subject.is_empty()
            || triple.predicate.is_empty()
            || (self.config.literals == LiteralPolicy::Ignore && triple.object.is_empty());

        let source_id = self.add_vertex(&triple.subject, state, counters, sink)?;
        if skip_destination {
            return Ok(());
        }
        let destination_id = self.add_vertex(&triple.object, state, counters, sink)?;
        if self_loop {
            return Ok(());
        }

        if !(policy.skip_duplicate_pairs && state.edge_pairs.contains(source_id, destination_id)) {
            sink.write_edge(&triple.subject, &triple.object, &triple.predicate)?;
            counters.edges_written += 1;
        }
        // Tracked after writing, otherwise the first occurrence would be dropped too.
        if policy.track_edges && self.config.pair_tracking.tracks(&triple.predicate) {
            state.edge_pairs.insert(source_id, destination_id);
        }

        if self.config.collect_triples {
            triples.entry(triple.subject.clone()).or_default().push(triple);
        }
        Ok(())
    }

    fn add_vertex<W: Write>(
        &self,
        name: &str,
        state: &mut GraphState,
        counters: &mut Counters,
        sink: &mut EdgeListSink<W>,
    ) -> Result<u64> {
        let (id, inserted) = state.vertices.fetch_id(name);
        if inserted {
            sink.write_vertex(name, instance_type_of(self.instance_types, name))?;
            counters.vertices_added += 1;
        }
        Ok(id)
    }
}
