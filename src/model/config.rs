//! The section → key → value configuration tree.

use super::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Keys and values of one section, in insertion order.
pub type Section = IndexMap<String, Value>;

/// Ordered two-level configuration mapping.
///
/// Insertion order of both sections and keys is preserved and decides output
/// order. Re-inserting an existing section or key replaces its content but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigTree {
    sections: IndexMap<String, Section>,
}

impl ConfigTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a section with an empty mapping.
    pub fn start_section(&mut self, name: impl Into<String>) {
        self.sections.insert(name.into(), Section::new());
    }

    /// Insert a key into an existing section, overwriting any previous value.
    ///
    /// Returns `false` (and stores nothing) if the section does not exist.
    pub fn insert(&mut self, section: &str, key: impl Into<String>, value: Value) -> bool {
        match self.sections.get_mut(section) {
            Some(entries) => {
                entries.insert(key.into(), value);
                true
            }
            None => false,
        }
    }

    /// Get a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Get a value by section and key.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Iterate over sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Section names in insertion order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of keys across all sections.
    pub fn key_count(&self) -> usize {
        self.sections.values().map(IndexMap::len).sum()
    }

    /// Check if the tree has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_requires_section() {
        let mut tree = ConfigTree::new();
        assert!(!tree.insert("Loader", "path", "data.csv".into()));
        assert!(tree.is_empty());

        tree.start_section("Loader");
        assert!(tree.insert("Loader", "path", "data.csv".into()));
        assert_eq!(tree.get("Loader", "path"), Some(&Value::string("data.csv")));
    }

    #[test]
    fn test_restart_section_keeps_position_and_clears() {
        let mut tree = ConfigTree::new();
        tree.start_section("A");
        tree.insert("A", "x", 1i64.into());
        tree.start_section("B");
        tree.start_section("A");

        assert_eq!(tree.section_names(), vec!["A", "B"]);
        assert!(tree.section("A").unwrap().is_empty());
    }

    #[test]
    fn test_key_overwrite_keeps_order() {
        let mut tree = ConfigTree::new();
        tree.start_section("S");
        tree.insert("S", "a", 1i64.into());
        tree.insert("S", "b", 2i64.into());
        tree.insert("S", "a", 3i64.into());

        let keys: Vec<_> = tree.section("S").unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(tree.get("S", "a"), Some(&Value::Integer(3)));
        assert_eq!(tree.key_count(), 2);
    }
}
