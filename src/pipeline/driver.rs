//! Pipeline driver that converts an ordered list of triple files into one graph.
//!
//! The driver does the following things:
//! 1. Loads the optional instance-type dictionary and vertex set.
//! 2. Opens the vertex and edge files once for the whole run.
//! 3. Streams every input file through the graph writer, in order, threading the
//!    vertex dictionary and tracked pairs from one file to the next.
//! 4. Writes the loader descriptor and reports run metrics.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use regex::Regex;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::graph::{FilePolicy, GraphState, GraphWriter, TripleLog};
use crate::indexing::{InstanceTypes, VertexSet};
use crate::pipeline::loader_config::GraphLoaderConfig;
use crate::sources::TripleSource;
use crate::storage::EdgeListSink;

/// Role of an input file, derived from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Wiki page links. Edges already tracked by earlier files are not repeated.
    PageLinks,
    /// Any other dump; every accepted edge is written.
    Other,
}

impl InputKind {
    pub fn classify(path: &Path) -> Self {
        static PAGE_LINKS: OnceLock<Regex> = OnceLock::new();
        let pattern =
            PAGE_LINKS.get_or_init(|| Regex::new(r"page[_-]links").expect("valid page-links pattern"));

        if pattern.is_match(&path.to_string_lossy()) {
            InputKind::PageLinks
        } else {
            InputKind::Other
        }
    }

    pub fn file_policy(self) -> FilePolicy {
        FilePolicy { skip_duplicate_pairs: self == InputKind::PageLinks, track_edges: true }
    }
}

/// Counters for one input file.
#[derive(Debug, Clone)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub kind: InputKind,
    pub lines_read: u64,
    pub edges_written: u64,
    pub vertices_added: u64,
    pub self_loops_skipped: u64,
    pub malformed_lines: u64,
    pub orphan_vertices: u64,
    pub elapsed_seconds: f64,
}

/// Counters for a whole run.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    pub files: Vec<FileMetrics>,
    pub lines_read: u64,
    pub edges_written: u64,
    pub vertices: u64,
    pub tracked_pairs: u64,
    pub self_loops_skipped: u64,
    pub malformed_lines: u64,
    pub orphan_vertices: u64,
    pub elapsed_seconds: f64,
}

impl PipelineMetrics {
    pub fn lines_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.lines_read as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }

    pub fn edges_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.edges_written as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// Result of a run: metrics plus the final shared state.
#[derive(Debug)]
pub struct PipelineReport {
    pub metrics: PipelineMetrics,
    pub state: GraphState,
    /// Accepted triples per subject across all files, in reading order; empty
    /// unless collection is enabled.
    pub triples: TripleLog,
}

pub struct Pipeline {
    config: PipelineConfig,
    instance_types: Option<InstanceTypes>,
}

impl Pipeline {
    /// Validate `config` and load the lookup tables it names.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let instance_types = match &config.instance_types {
            Some(path) => {
                let types = InstanceTypes::load_from_file(path)?;
                info!(path = %path.display(), entries = types.len(), "loaded instance dictionary");
                Some(types)
            }
            None => None,
        };

        let vertex_set = match &config.vertex_set {
            Some(path) => {
                let vertices = VertexSet::load_from_file(path)?;
                info!(path = %path.display(), entries = vertices.len(), "loaded vertex set");
                Some(vertices)
            }
            None => None,
        };

        Ok(Self::assemble(config, instance_types, vertex_set))
    }

    /// Build a pipeline around lookup tables that are already in memory. Members
    /// of `vertex_set` without a type join the instance dictionary with the
    /// default type.
    pub fn with_lookups(
        config: PipelineConfig,
        instance_types: Option<InstanceTypes>,
        vertex_set: Option<VertexSet>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, instance_types, vertex_set))
    }

    fn assemble(
        config: PipelineConfig,
        instance_types: Option<InstanceTypes>,
        vertex_set: Option<VertexSet>,
    ) -> Self {
        let instance_types = match (instance_types, vertex_set) {
            (types, None) => types,
            (types, Some(vertices)) => {
                let mut types = types.unwrap_or_default();
                let added = types.merge_vertex_set(&vertices);
                debug!(added, "vertex set merged into instance dictionary");
                Some(types)
            }
        };

        Self { config, instance_types }
    }

    pub fn instance_types(&self) -> Option<&InstanceTypes> {
        self.instance_types.as_ref()
    }

    /// Convert every input file, then write the loader descriptor.
    pub fn run(&self) -> Result<PipelineReport> {
        let config = &self.config;
        let conversion = &config.conversion;

        info!("converting RDF triples into an edge-list graph");
        info!(
            inputs = %config.inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join("; "),
            vertices = %config.vertex_output.display(),
            edges = %config.edge_output.display(),
            loader_config = %config.loader_config_output.display(),
            literals = ?conversion.literals,
            restrict_to_known_instances = conversion.restrict_to_known_instances,
            add_orphan_vertices = conversion.add_orphan_vertices,
            max_lines = conversion.max_lines,
            "run configuration"
        );

        let started = Instant::now();
        let mut sink =
            EdgeListSink::open(&config.vertex_output, &config.edge_output, conversion.output_mode)?;
        let writer = GraphWriter::new(conversion, self.instance_types.as_ref());

        let mut state = GraphState::new();
        let mut triples = TripleLog::new();
        let mut metrics = PipelineMetrics::default();

        for path in &config.inputs {
            let kind = InputKind::classify(path);
            let policy = kind.file_policy();
            info!(path = %path.display(), ?kind, "processing");
            debug!(?policy, "file policy");

            let file_started = Instant::now();
            let source = TripleSource::open(path)?;
            let outcome = writer.write_graph(source.lines(), &mut sink, state, policy)?;
            state = outcome.state;
            for (subject, accepted) in outcome.triples {
                triples.entry(subject).or_default().extend(accepted);
            }

            metrics.lines_read += outcome.lines_read;
            metrics.edges_written += outcome.edges_written;
            metrics.self_loops_skipped += outcome.self_loops_skipped;
            metrics.malformed_lines += outcome.malformed_lines;
            metrics.orphan_vertices += outcome.orphan_vertices;
            metrics.files.push(FileMetrics {
                path: path.clone(),
                kind,
                lines_read: outcome.lines_read,
                edges_written: outcome.edges_written,
                vertices_added: outcome.vertices_added,
                self_loops_skipped: outcome.self_loops_skipped,
                malformed_lines: outcome.malformed_lines,
                orphan_vertices: outcome.orphan_vertices,
                elapsed_seconds: file_started.elapsed().as_secs_f64(),
            });

            info!(
                edges = metrics.edges_written,
                edge_pairs = state.edge_pairs.len(),
                "current edge count"
            );
        }
        sink.flush()?;
        drop(sink);

        metrics.vertices = state.vertices.len() as u64;
        metrics.tracked_pairs = state.edge_pairs.len() as u64;
        metrics.elapsed_seconds = started.elapsed().as_secs_f64();

        GraphLoaderConfig::edge_list(&config.vertex_output, &config.edge_output)
            .write_to_file(&config.loader_config_output)?;

        info!(
            lines = metrics.lines_read,
            vertices = metrics.vertices,
            edges = metrics.edges_written,
            self_loops = metrics.self_loops_skipped,
            malformed = metrics.malformed_lines,
            elapsed_secs = metrics.elapsed_seconds,
            "execution done"
        );

        Ok(PipelineReport { metrics, state, triples })
    }
}
