use std::collections::HashMap;

/// Assigns stable ids to vertex names in first-seen order, starting at 1.
///
/// The dictionary only grows: once a name has an id, that id never changes for the
/// rest of the run, whichever input file the name shows up in again.
#[derive(Debug, Clone)]
pub struct VertexDictionary {
    name_to_id: HashMap<String, u64>,
    next_id: u64,
}

impl VertexDictionary {
    pub fn new() -> Self {
        Self { name_to_id: HashMap::new(), next_id: 1 }
    }

    /// Id of `name`, assigning the next one when the name is unseen. The flag is
    /// true when the id was freshly assigned.
    pub fn fetch_id(&mut self, name: &str) -> (u64, bool) {
        if let Some(&id) = self.name_to_id.get(name) {
            return (id, false);
        }
        let id = self.next_id;
        self.name_to_id.insert(name.to_string(), id);
        self.next_id += 1;
        (id, true)
    }

    /// Add `name` if it is unseen. Returns the fresh id, or `None` when the name
    /// already had one.
    pub fn insert(&mut self, name: &str) -> Option<u64> {
        match self.fetch_id(name) {
            (id, true) => Some(id),
            (_, false) => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.name_to_id.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }
}

impl Default for VertexDictionary {
    fn default() -> Self {
        Self::new()
    }
}
