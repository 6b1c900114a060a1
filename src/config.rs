//! Configuration structures for a conversion run.
//!
//! Per-line options are grouped in [`ConversionConfig`]; the files of a run and
//! the external lookup tables are named by [`PipelineConfig`]. Both can be read
//! from JSON, and missing keys fall back to the defaults below.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with objects that are literals rather than bracketed URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralPolicy {
    /// Literals clean to the empty string and never become vertices.
    Ignore,
    /// The quoted text of a literal becomes a vertex name.
    Keep,
}

/// How the name of a bracketed URI is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceExtraction {
    /// Remove a known DBPedia prefix when present, else keep the last path segment.
    StripDbpediaPrefix,
    /// Always keep the last path segment.
    LastPathSegment,
}

/// Which accepted edges are remembered in the pair set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairTracking {
    /// Every accepted (source, destination) pair.
    All,
    /// Only pairs whose relation is a redirect or disambiguation predicate.
    RedirectsAndDisambiguations,
}

/// Relations tracked by [`PairTracking::RedirectsAndDisambiguations`].
pub const TRACKED_RELATIONS: [&str; 2] = ["wikiPageRedirects", "wikiPageDisambiguates"];

impl PairTracking {
    pub fn tracks(self, relation: &str) -> bool {
        match self {
            PairTracking::All => true,
            PairTracking::RedirectsAndDisambiguations => TRACKED_RELATIONS.contains(&relation),
        }
    }
}

/// Handling of lines that do not split into three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Log a warning, count the line and move on.
    Skip,
    /// Abort the run.
    Fail,
}

/// How the vertex and edge files are opened at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Create the files if needed and append to existing content.
    Append,
    /// Create the files and discard existing content.
    Truncate,
}

/// Options applied uniformly to every line of every input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub literals: LiteralPolicy,
    pub extraction: ResourceExtraction,
    pub pair_tracking: PairTracking,
    pub malformed_lines: MalformedLinePolicy,
    pub output_mode: OutputMode,
    /// Admit a line only when both endpoints are keys of the instance-type dictionary.
    pub restrict_to_known_instances: bool,
    /// After each file, add every instance-type key that is not yet a vertex.
    pub add_orphan_vertices: bool,
    /// Keep the accepted triples of each file, grouped by source.
    pub collect_triples: bool,
    /// Line ceiling per input file; 0 reads everything.
    pub max_lines: u64,
    /// Lines between two progress log entries.
    pub progress_interval: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            literals: LiteralPolicy::Keep,
            extraction: ResourceExtraction::StripDbpediaPrefix,
            pair_tracking: PairTracking::All,
            malformed_lines: MalformedLinePolicy::Skip,
            output_mode: OutputMode::Append,
            restrict_to_known_instances: false,
            add_orphan_vertices: false,
            collect_triples: false,
            max_lines: 0,
            progress_interval: 100_000,
        }
    }
}

impl ConversionConfig {
    /// Accepts the signed ceiling used on the command line; zero or negative means unbounded.
    pub fn with_line_limit(mut self, limit: i64) -> Self {
        self.max_lines = u64::try_from(limit).unwrap_or(0);
        self
    }

    pub fn line_limit(&self) -> Option<u64> {
        (self.max_lines > 0).then_some(self.max_lines)
    }
}

/// Everything a pipeline run needs: inputs, outputs, lookup tables and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Triple files, processed in this order.
    pub inputs: Vec<PathBuf>,
    pub vertex_output: PathBuf,
    pub edge_output: PathBuf,
    /// Where the loader descriptor is written.
    pub loader_config_output: PathBuf,
    /// Bincode-serialized instance-type dictionary.
    #[serde(default)]
    pub instance_types: Option<PathBuf>,
    /// Bincode-serialized vertex set.
    #[serde(default)]
    pub vertex_set: Option<PathBuf>,
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl PipelineConfig {
    pub fn new(
        inputs: Vec<PathBuf>,
        vertex_output: impl Into<PathBuf>,
        edge_output: impl Into<PathBuf>,
        loader_config_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            inputs,
            vertex_output: vertex_output.into(),
            edge_output: edge_output.into(),
            loader_config_output: loader_config_output.into(),
            instance_types: None,
            vertex_set: None,
            conversion: ConversionConfig::default(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
        let config: PipelineConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Checks the configuration once, before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::Config("no input files given".to_string()));
        }
        if self.vertex_output == self.edge_output {
            return Err(Error::Config(format!(
                "vertex and edge output share the same path: {}",
                self.vertex_output.display()
            )));
        }
        if self.conversion.progress_interval == 0 {
            return Err(Error::Config("progress interval must be positive".to_string()));
        }
        if self.conversion.restrict_to_known_instances
            && self.instance_types.is_none()
            && self.vertex_set.is_none()
        {
            tracing::warn!(
                "restriction to known instances requested without an instance dictionary, \
                 every line will be admitted"
            );
        }
        Ok(())
    }
}
