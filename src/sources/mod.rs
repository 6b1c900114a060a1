//! Line sources over triple files

pub mod triple_source;

pub use triple_source::{Compression, SourceLines, TripleSource};
