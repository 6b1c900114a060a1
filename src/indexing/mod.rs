//! In-memory indexes threaded through a conversion run

pub mod dictionary;
pub mod edge_set;
pub mod instance_types;

pub use dictionary::VertexDictionary;
pub use edge_set::EdgePairSet;
pub use instance_types::{InstanceTypes, VertexSet};
