//! Duplicate row suppression for a single decode run

use std::collections::{HashMap, HashSet};

/// Set of `(matching key, text)` pairs already written
///
/// In content mode the key is the text itself, so identical strings collapse
/// to one row. In variable mode every identity is unique and a row is only
/// dropped if the same identity shows up twice with the same text.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashMap<String, HashSet<String>>,
    count: usize,
}

impl DedupIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair, returning `true` the first time it is seen
    pub fn observe(&mut self, key: &str, text: &str) -> bool {
        if self.contains(key, text) {
            return false;
        }
        self.seen
            .entry(key.to_string())
            .or_default()
            .insert(text.to_string());
        self.count += 1;
        true
    }

    /// Whether the pair has been observed
    #[must_use]
    pub fn contains(&self, key: &str, text: &str) -> bool {
        self.seen.get(key).is_some_and(|texts| texts.contains(text))
    }

    /// Number of distinct pairs observed
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_once() {
        let mut index = DedupIndex::new();
        assert!(index.is_empty());
        assert!(index.observe("Hello", "Hello"));
        assert!(!index.observe("Hello", "Hello"));
        assert!(index.observe("Bye", "Bye"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_pair_is_the_identity() {
        let mut index = DedupIndex::new();
        assert!(index.observe("<A|k>", "Hello"));
        assert!(index.observe("<B|k>", "Hello"));
        assert!(index.observe("<A|k>", "Hi"));
        assert!(!index.observe("<A|k>", "Hello"));
        assert!(index.contains("<B|k>", "Hello"));
        assert!(!index.contains("<C|k>", "Hello"));
    }
}
