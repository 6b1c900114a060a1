use std::collections::HashSet;

/// Directed (source id, destination id) pairs already written as edges.
#[derive(Debug, Clone, Default)]
pub struct EdgePairSet {
    pairs: HashSet<(u64, u64)>,
}

impl EdgePairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the pair was not tracked before.
    pub fn insert(&mut self, source: u64, destination: u64) -> bool {
        self.pairs.insert((source, destination))
    }

    pub fn contains(&self, source: u64, destination: u64) -> bool {
        self.pairs.contains(&(source, destination))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
