//! Ordered registry of mapping entries and type resolution

use crate::error::{NormalizeError, NormalizeResult};
use crate::mapping::config::MappingConfig;
use crate::mapping::Mappable;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A rule binding a type or capability to a wrapping key and an extraction method
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingEntry {
    /// Exact type tag or capability name
    pub matcher: String,
    /// Key the extracted value is wrapped under when the instance is the root
    pub key: String,
    /// Zero-argument extraction method invoked on the instance
    pub method: String,
}

impl MappingEntry {
    pub fn new(
        matcher: impl Into<String>,
        key: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            matcher: matcher.into(),
            key: key.into(),
            method: method.into(),
        }
    }
}

/// How an entry was selected for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The instance's type tag equals the matcher
    Exact,
    /// The instance satisfies the matcher as a supertype or capability
    Structural,
}

/// Result of a successful lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub entry: &'a MappingEntry,
    pub kind: MatchKind,
}

/// Immutable, ordered table of mapping entries
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    entries: Vec<MappingEntry>,
    /// Matcher to the index of its first entry
    exact: HashMap<String, usize>,
}

impl MappingRegistry {
    /// Build a registry; entry order is resolution order
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        let mut exact = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            exact.entry(entry.matcher.clone()).or_insert(index);
        }

        tracing::debug!(entries = entries.len(), "built mapping registry");

        Self { entries, exact }
    }

    /// Build a registry from an in-memory configuration table
    pub fn from_value(value: &Value) -> NormalizeResult<Self> {
        Ok(MappingConfig::from_value(value)?.into_registry())
    }

    /// Registered entries in configuration order
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `instance`: exact type tag first, then the first
    /// entry in registration order whose matcher the instance satisfies.
    pub fn lookup(&self, instance: &dyn Mappable) -> Option<Match<'_>> {
        let type_name = instance.type_name();

        if let Some(&index) = self.exact.get(type_name) {
            return Some(Match {
                entry: &self.entries[index],
                kind: MatchKind::Exact,
            });
        }

        self.entries
            .iter()
            .find(|entry| instance.satisfies(&entry.matcher))
            .map(|entry| Match {
                entry,
                kind: MatchKind::Structural,
            })
    }

    /// Resolve the entry for `instance`, failing with `NoMappingFound`
    pub fn resolve(&self, instance: &dyn Mappable) -> NormalizeResult<&MappingEntry> {
        self.lookup(instance)
            .map(|found| found.entry)
            .ok_or_else(|| NormalizeError::no_mapping(instance.type_name()))
    }
}

impl From<Vec<MappingEntry>> for MappingRegistry {
    fn from(entries: Vec<MappingEntry>) -> Self {
        Self::new(entries)
    }
}
