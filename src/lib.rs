//! # rdf-edgelist
//!
//! rdf-edgelist turns DBPedia-style RDF dumps into an edge-list graph that a graph
//! engine can bulk load.
//!
//! Triple files are streamed one line at a time (plain text, gzip or bzip2), each
//! resource is cleaned into a uniform vertex name, and every previously unseen
//! name receives a stable integer id. The vertex dictionary and the set of tracked
//! vertex pairs are threaded through every input file of a run, so a resource seen
//! in the first file keeps its id when it shows up again in the last one.
//!
//! ## Features
//!
//! - Single pass, constant memory per line, over arbitrarily large dumps
//! - Shared vertex-id space and edge deduplication across input files
//! - JSON loader descriptor for the produced vertex and edge files
//! - Builders for the vertex set and instance-type dictionary consumed by the converter
//!
//! ## Example
//!
//! ```rust
//! use rdf_edgelist::parsing::rdf_parser::clean_line;
//! use rdf_edgelist::config::{LiteralPolicy, ResourceExtraction};
//!
//! let line = "<http://dbpedia.org/resource/A> <http://dbpedia.org/ontology/linksTo> <http://dbpedia.org/resource/B> .";
//! let triple = clean_line(line, LiteralPolicy::Ignore, ResourceExtraction::StripDbpediaPrefix).unwrap();
//! assert_eq!(triple.subject, "A");
//! assert_eq!(triple.object, "B");
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

/// Core data structures and types
pub mod core;

/// Run configuration and option enumerations
pub mod config;

/// Triple line splitting and resource cleaning
pub mod parsing;

/// Line sources over plain and compressed triple files
pub mod sources;

/// Vertex dictionary, tracked pairs and the external lookup tables
pub mod indexing;

/// Vertex and edge output files
pub mod storage;

/// The per-file graph writer
pub mod graph;

/// Multi-file orchestration and the loader descriptor
pub mod pipeline;

/// Builders for the vertex set and the instance-type dictionary
pub mod builders;

pub mod error {
    //! Error types and result definitions

    use std::path::PathBuf;
    use thiserror::Error;

    /// Result type alias for conversion operations
    pub type Result<T> = std::result::Result<T, Error>;

    /// Main error type for rdf-edgelist
    #[derive(Error, Debug)]
    pub enum Error {
        /// Configuration error
        #[error("Configuration error: {0}")]
        Config(String),

        /// An input or output file could not be opened
        #[error("Cannot open {path}: {source}")]
        Open {
            /// Offending path
            path: PathBuf,
            /// Underlying failure
            source: std::io::Error,
        },

        /// A line of an input file is not valid UTF-8
        #[error("Invalid UTF-8 in {path} at line {line}")]
        Encoding {
            /// Offending input file
            path: PathBuf,
            /// 0-based line index
            line: u64,
        },

        /// A line does not hold three fields
        #[error("Malformed triple at line {line_number}: {line}")]
        MalformedLine {
            /// 0-based line index
            line_number: u64,
            /// Raw line content
            line: String,
        },

        /// Serialization error
        #[error("Serialization error: {0}")]
        Serialization(String),

        /// IO error
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }

    impl From<serde_json::Error> for Error {
        fn from(err: serde_json::Error) -> Self {
            Error::Serialization(err.to_string())
        }
    }

    impl From<bincode::Error> for Error {
        fn from(err: bincode::Error) -> Self {
            Error::Serialization(err.to_string())
        }
    }
}

// Re-export commonly used types
pub use error::{Error, Result};
