//! Multi-file orchestration of a conversion run

pub mod driver;
pub mod loader_config;

pub use driver::{FileMetrics, InputKind, Pipeline, PipelineMetrics, PipelineReport};
pub use loader_config::GraphLoaderConfig;
