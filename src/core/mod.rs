//! Core data structures and types for the edge-list converter

use std::fmt;

/// Type written for vertices that have no entry in the instance-type dictionary.
pub const DEFAULT_INSTANCE_TYPE: &str = "owl#Thing";

/// A cleaned RDF statement. Any field may be empty, which means it does not name
/// a usable resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
        }
    }

    /// True when subject and object clean to the same text.
    pub fn is_self_loop(&self) -> bool {
        self.subject == self.object
    }
}

/// One line of the vertex file: `"<name>" * "<type>"`.
#[derive(Debug, Clone, Copy)]
pub struct VertexRecord<'a> {
    pub name: &'a str,
    pub instance_type: &'a str,
}

impl fmt::Display for VertexRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" * \"{}\"", self.name, self.instance_type)
    }
}

/// One line of the edge file: `"<source>" "<destination>" "<relation>"`.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRecord<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub relation: &'a str,
}

impl fmt::Display for EdgeRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" \"{}\" \"{}\"", self.source, self.destination, self.relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_formats() {
        let vertex = VertexRecord { name: "Alan_Turing", instance_type: "Scientist" };
        assert_eq!(vertex.to_string(), "\"Alan_Turing\" * \"Scientist\"");

        let edge = EdgeRecord { source: "A", destination: "B", relation: "linksTo" };
        assert_eq!(edge.to_string(), "\"A\" \"B\" \"linksTo\"");
    }

    #[test]
    fn test_self_loop() {
        assert!(Triple::new("A", "p", "A").is_self_loop());
        assert!(!Triple::new("A", "p", "B").is_self_loop());
    }
}
