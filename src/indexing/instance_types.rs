//! Lookup tables produced ahead of a conversion run: the set of known resource
//! names and the resource-name to RDF-type dictionary. Both are persisted with
//! bincode.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_INSTANCE_TYPE;
use crate::error::{Error, Result};

/// Resource names accepted as vertices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexSet {
    names: HashSet<String>,
}

impl VertexSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_bincode(self, path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        load_bincode(path)
    }
}

impl<S: Into<String>> FromIterator<S> for VertexSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { names: iter.into_iter().map(Into::into).collect() }
    }
}

/// Resource name to RDF instance type. Names are kept sorted so that orphan
/// vertices are always emitted in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTypes {
    types: BTreeMap<String, String>,
}

impl InstanceTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type of `name`, replacing any previous one.
    pub fn insert(&mut self, name: &str, instance_type: &str) {
        self.types.insert(name.to_string(), instance_type.to_string());
    }

    /// Record a type read from an instance-type dump. An existing entry is only
    /// replaced while it still holds the generic [`DEFAULT_INSTANCE_TYPE`].
    pub fn record(&mut self, name: &str, instance_type: &str) -> bool {
        match self.types.get_mut(name) {
            Some(existing) if existing == DEFAULT_INSTANCE_TYPE => {
                *existing = instance_type.to_string();
                true
            }
            Some(_) => false,
            None => {
                self.types.insert(name.to_string(), instance_type.to_string());
                true
            }
        }
    }

    /// Give every member of `vertices` without a type the default one.
    /// Returns how many names were added.
    pub fn merge_vertex_set(&mut self, vertices: &VertexSet) -> usize {
        let mut added = 0;
        for name in vertices.iter() {
            if !self.types.contains_key(name) {
                self.types.insert(name.to_string(), DEFAULT_INSTANCE_TYPE.to_string());
                added += 1;
            }
        }
        added
    }

    /// Type of `name`, or [`DEFAULT_INSTANCE_TYPE`] when it has none.
    pub fn type_of(&self, name: &str) -> &str {
        self.types.get(name).map_or(DEFAULT_INSTANCE_TYPE, String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_bincode(self, path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        load_bincode(path)
    }
}

/// Type lookup that tolerates a missing dictionary.
pub fn instance_type_of<'a>(types: Option<&'a InstanceTypes>, name: &str) -> &'a str {
    types.map_or(DEFAULT_INSTANCE_TYPE, |types| types.type_of(name))
}

fn save_bincode<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file =
        File::create(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn load_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file =
        File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    let value = bincode::deserialize_from(BufReader::new(file))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_type() {
        let mut types = InstanceTypes::new();
        types.insert("Alan_Turing", "Scientist");
        assert_eq!(types.type_of("Alan_Turing"), "Scientist");
        assert_eq!(types.type_of("London"), DEFAULT_INSTANCE_TYPE);
        assert_eq!(instance_type_of(None, "Alan_Turing"), DEFAULT_INSTANCE_TYPE);
        assert_eq!(instance_type_of(Some(&types), "Alan_Turing"), "Scientist");
    }

    #[test]
    fn test_record_only_refines_generic_type() {
        let mut types = InstanceTypes::new();
        assert!(types.record("A", DEFAULT_INSTANCE_TYPE));
        assert!(types.record("A", "Person"));
        assert!(!types.record("A", "Place"));
        assert_eq!(types.type_of("A"), "Person");
    }

    #[test]
    fn test_merge_vertex_set() {
        let mut types = InstanceTypes::new();
        types.insert("A", "Person");
        let vertices: VertexSet = ["A", "B"].into_iter().collect();
        assert_eq!(types.merge_vertex_set(&vertices), 1);
        assert_eq!(types.type_of("A"), "Person");
        assert_eq!(types.type_of("B"), DEFAULT_INSTANCE_TYPE);
        assert!(types.contains("B"));
    }

    #[test]
    fn test_names_are_sorted() {
        let mut types = InstanceTypes::new();
        types.insert("b", "T");
        types.insert("a", "T");
        assert_eq!(types.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();

        let mut types = InstanceTypes::new();
        types.insert("Alan_Turing", "Scientist");
        let path = dir.path().join("instance_types.bin");
        types.save_to_file(&path).unwrap();
        assert_eq!(InstanceTypes::load_from_file(&path).unwrap(), types);

        let vertices: VertexSet = ["A", "B"].into_iter().collect();
        let path = dir.path().join("vertex_set.bin");
        vertices.save_to_file(&path).unwrap();
        assert_eq!(VertexSet::load_from_file(&path).unwrap(), vertices);
    }

    #[test]
    fn test_load_missing_file() {
        let result = VertexSet::load_from_file(Path::new("no/such/vertex_set.bin"));
        assert!(matches!(result, Err(Error::Open { .. })));
    }
}
