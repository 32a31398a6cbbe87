use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::heuristics::{affiliations_similar, HeuristicsConfig};
use crate::models::{AffiliationMergeMap, MergedTable};

/// Configuration for affiliation deduplication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupeConfig {
    /// Affiliations known to be distinct despite passing the heuristic
    pub not_suspicious: Vec<String>,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            not_suspicious: vec![
                "Department of Pathology, University Hospital Ghent, Belgium.".to_string(),
                "Department of Pathology, GZA-ZNA Ziekenhuizen, Antwerp, Belgium".to_string(),
                "Department of Pathology, Gustave Roussy, Grand Paris, France.".to_string(),
                "Department of Pathology, GZA-ZNA Hospitals, Antwerp, Belgium".to_string(),
                "Department of Medical Oncology, Gustave Roussy, Villejuif, France.".to_string(),
                "Division of Molecular Pathology, The Netherlands Cancer Institute, Amsterdam, the Netherlands"
                    .to_string(),
            ],
        }
    }
}

impl DedupeConfig {
    fn is_excluded(&self, affiliation: &str) -> bool {
        self.not_suspicious.iter().any(|s| s.trim() == affiliation)
    }
}

/// A pair of affiliations that will be merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedPair {
    pub duplicate: String,
    pub canonical: String,
}

/// Result of affiliation deduplication
#[derive(Debug, Clone, Default)]
pub struct DedupeResult {
    pub merge_map: AffiliationMergeMap,
    pub merged_pairs: Vec<MergedPair>,
}

/// Pick the canonical spelling of a similar pair: the longer text, or the
/// lexicographically smaller one on a tie
fn order_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    match a.chars().count().cmp(&b.chars().count()) {
        Ordering::Greater => (b, a),
        Ordering::Less => (a, b),
        Ordering::Equal if a <= b => (b, a),
        Ordering::Equal => (a, b),
    }
}

/// Find near-duplicate affiliations among the distinct texts of a table
pub fn find_similar_affiliations(
    affiliations: &[String],
    heuristics: &HeuristicsConfig,
    config: &DedupeConfig,
) -> DedupeResult {
    let mut result = DedupeResult::default();

    for (i, a1) in affiliations.iter().enumerate() {
        for a2 in &affiliations[i + 1..] {
            if a1 == a2 || !affiliations_similar(a1, a2, heuristics) {
                continue;
            }
            if config.is_excluded(a1.trim()) || config.is_excluded(a2.trim()) {
                continue;
            }

            let (duplicate, canonical) = order_pair(a1, a2);
            result.merge_map.insert(duplicate, canonical);
        }
    }

    // A later pair replaces an earlier mapping for the same duplicate, so
    // report only what survives in the map.
    result.merged_pairs = result
        .merge_map
        .iter()
        .map(|(duplicate, canonical)| MergedPair {
            duplicate: duplicate.to_string(),
            canonical: canonical.to_string(),
        })
        .collect();

    result
}

/// Detect suspiciously similar affiliations and merge them in place
///
/// Merged pairs are reported at warn level for manual review; add false
/// positives to `DedupeConfig::not_suspicious` and rerun.
pub fn dedupe_affiliations(
    table: &mut MergedTable,
    heuristics: &HeuristicsConfig,
    config: &DedupeConfig,
) -> DedupeResult {
    let affiliations = table.distinct_affiliations();
    let result = find_similar_affiliations(&affiliations, heuristics, config);

    if !result.merged_pairs.is_empty() {
        warn!(
            "There are {} suspiciously similar affiliations that WILL BE MERGED",
            result.merged_pairs.len()
        );
        for pair in &result.merged_pairs {
            warn!("  {:?}\n    -> {:?}", pair.duplicate, pair.canonical);
        }
    }

    for row in &mut table.rows {
        let trimmed = row.affiliation.trim();
        if trimmed.len() != row.affiliation.len() {
            row.affiliation = trimmed.to_string();
        }
    }
    let changed = result.merge_map.apply(table);

    info!(
        "Deduplicated {} distinct affiliations: {} merged, {} rows rewritten",
        affiliations.len(),
        result.merge_map.len(),
        changed
    );

    result
}
