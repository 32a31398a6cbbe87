use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::MergedTable;

/// Affiliation code to full text, as read from the lookup file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffiliationLookup {
    entries: HashMap<String, String>,
}

impl AffiliationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code; a repeated code replaces the earlier text
    pub fn insert(&mut self, code: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(code.into(), text.into());
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AffiliationLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (code, text) in iter {
            lookup.insert(code, text);
        }
        lookup
    }
}

/// A numbered affiliation in the rendered citation block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationRecord {
    /// 1-based superscript index
    pub index: usize,
    pub canonical_text: String,
}

/// Duplicate spelling -> canonical spelling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AffiliationMergeMap {
    entries: BTreeMap<String, String>,
}

impl AffiliationMergeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, duplicate: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(duplicate.into(), canonical.into());
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

    /// Resolve a spelling, following chains until a spelling with no mapping
    pub fn canonical<'a>(&'a self, affiliation: &'a str) -> &'a str {
        let mut current = affiliation;
        let mut seen = HashSet::new();
        while let Some(next) = self.entries.get(current) {
            if !seen.insert(current) {
                break;
            }
            current = next.as_str();
        }
        current
    }

    /// Rewrite every row's affiliation to its canonical spelling.
    /// Returns the number of rows changed.
    pub fn apply(&self, table: &mut MergedTable) -> usize {
        let mut changed = 0;
        for row in &mut table.rows {
            let canonical = self.canonical(&row.affiliation);
            if canonical != row.affiliation {
                let canonical = canonical.to_string();
                row.affiliation = canonical;
                changed += 1;
            }
        }
        changed
    }
}
