//! Parsing of raw triple lines into cleaned vertex names

pub mod rdf_parser;

pub use rdf_parser::{clean_line, clean_resource, clean_text, split_triple};
