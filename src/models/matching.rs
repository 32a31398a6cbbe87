use std::collections::BTreeMap;

use serde::Serialize;

/// Working-group spelling -> reference spelling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchMapping {
    entries: BTreeMap<String, String>,
}

impl MatchMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match. A later match for the same member replaces the earlier one.
    pub fn insert(&mut self, member: impl Into<String>, reference: impl Into<String>) {
        self.entries.insert(member.into(), reference.into());
    }

    pub fn contains_member(&self, member: &str) -> bool {
        self.entries.contains_key(member)
    }

    pub fn reference_for(&self, member: &str) -> Option<&str> {
        self.entries.get(member).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs whose member spelling differs from the reference spelling
    pub fn misspellings(&self) -> Vec<(String, String)> {
        self.iter()
            .filter(|(member, reference)| member != reference)
            .map(|(member, reference)| (member.to_string(), reference.to_string()))
            .collect()
    }
}
