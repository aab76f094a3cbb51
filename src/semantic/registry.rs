//! The known-name registry consulted by the name checker.

use crate::config::AnalyzerConfig;
use smol_str::SmolStr;
use std::collections::BTreeSet;

/// Declared collection names plus the fixed set of known field names.
///
/// Collections only ever get added; there is no removal path. Field names
/// are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    collections: BTreeSet<SmolStr>,
    fields: BTreeSet<SmolStr>,
}

impl Registry {
    /// Creates a registry seeded from `config`.
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            collections: config.seed_collections.iter().cloned().collect(),
            fields: config.known_fields.iter().cloned().collect(),
        }
    }

    /// Returns true if `name` has been declared.
    pub fn contains_collection(&self, name: &str) -> bool {
        self.collections.contains(name)
    }

    /// Records `name` as declared. Returns true if it was new.
    pub fn declare_collection(&mut self, name: impl Into<SmolStr>) -> bool {
        let name = name.into();
        let added = self.collections.insert(name.clone());
        if added {
            tracing::debug!(collection = %name, total = self.collections.len(), "collection declared");
        }
        added
    }

    /// Returns true if `name` is one of the known field names.
    pub fn is_known_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    /// Number of declared collections.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Declared collections in sorted order.
    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(SmolStr::as_str)
    }

    /// Known field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(SmolStr::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}
