//! Conversion of triple streams into vertex and edge records

pub mod writer;

pub use writer::{FilePolicy, GraphState, GraphWriter, TripleLog, WriteOutcome};
