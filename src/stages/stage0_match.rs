use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CiteError, Result};
use crate::heuristics::{names_match, HeuristicsConfig};
use crate::models::{MatchMapping, ReferenceAuthor};

/// Configuration for author matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Fail when one reference author matches several working-group spellings
    pub strict_candidates: bool,
    /// Accept working-group spellings that differ from the reference spelling
    pub allow_spelling_variants: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            strict_candidates: true,
            allow_spelling_variants: false,
        }
    }
}

/// Result of matching reference authors against the working group
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Working-group spelling -> reference spelling
    pub mapping: MatchMapping,
    /// Reference authors with no working-group match, first-seen order
    pub unmatched: Vec<String>,
    /// Distinct working-group spellings matched by each reference author
    pub candidates: Vec<(String, Vec<String>)>,
}

impl MatchResult {
    /// Reference authors matched by more than one distinct spelling
    pub fn ambiguous(&self) -> Vec<(String, Vec<String>)> {
        self.candidates
            .iter()
            .filter(|(_, found)| found.len() > 1)
            .cloned()
            .collect()
    }

    /// Describe why the mapping is not one-to-one, one line per offender
    fn count_mismatch_details(&self) -> Vec<String> {
        let mut details = Vec::new();

        for (reference, found) in &self.candidates {
            match found.len() {
                0 => details.push(format!("{} matched nothing", reference)),
                1 => {}
                _ => details.push(format!("{} matched {}", reference, found.join(", "))),
            }
        }

        let mut claimed: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (reference, found) in &self.candidates {
            for member in found {
                claimed.entry(member.as_str()).or_default().push(reference.as_str());
            }
        }
        for (member, references) in claimed {
            if references.len() > 1 {
                details.push(format!("{} claimed by {}", member, references.join(", ")));
            }
        }

        details
    }
}

/// Pair every reference author with its working-group spelling(s)
///
/// `members` holds one name per roster row, so an author with several
/// affiliations appears several times; repeated names collapse in the
/// mapping.
pub fn match_authors(
    references: &[ReferenceAuthor],
    members: &[String],
    heuristics: &HeuristicsConfig,
) -> MatchResult {
    let mut result = MatchResult::default();

    for reference in references {
        let mut found: Vec<String> = Vec::new();

        for member in members {
            if names_match(&reference.name, member, heuristics) {
                debug!("Matched {:?} <- {:?}", reference.name, member);
                result.mapping.insert(member.clone(), reference.name.clone());
                if !found.contains(member) {
                    found.push(member.clone());
                }
            }
        }

        if found.is_empty() && !result.unmatched.contains(&reference.name) {
            result.unmatched.push(reference.name.clone());
        }
        result.candidates.push((reference.name.clone(), found));
    }

    info!(
        "Matched {} working-group spellings for {} reference authors ({} unmatched)",
        result.mapping.len(),
        references.len(),
        result.unmatched.len()
    );

    result
}

/// Abort on any matching anomaly
///
/// Checks run in order: ambiguous candidates (strict mode), unmatched
/// authors, one-to-one count, misspellings.
pub fn verify_matches(
    result: &MatchResult,
    reference_count: usize,
    config: &MatchConfig,
) -> Result<()> {
    if config.strict_candidates {
        let ambiguous = result.ambiguous();
        if !ambiguous.is_empty() {
            return Err(CiteError::AmbiguousCandidates(ambiguous));
        }
    }

    if !result.unmatched.is_empty() {
        return Err(CiteError::UnmatchedAuthors(result.unmatched.clone()));
    }

    if result.mapping.len() != reference_count {
        return Err(CiteError::MatchCountMismatch {
            expected: reference_count,
            found: result.mapping.len(),
            details: result.count_mismatch_details(),
        });
    }

    if !config.allow_spelling_variants {
        let misspelt = result.mapping.misspellings();
        if !misspelt.is_empty() {
            return Err(CiteError::MisspeltAuthors(misspelt));
        }
    }

    Ok(())
}

/// Match and verify in one step
pub fn execute_matching(
    references: &[ReferenceAuthor],
    members: &[String],
    heuristics: &HeuristicsConfig,
    config: &MatchConfig,
) -> Result<MatchMapping> {
    let result = match_authors(references, members, heuristics);
    verify_matches(&result, references.len(), config)?;
    Ok(result.mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_exact_matches_pass() {
        let refs = vec![
            ReferenceAuthor::new("Jane Doe", &["1"]),
            ReferenceAuthor::new("Bob Smith", &["2"]),
        ];
        let wg = members(&["Bob Smith", "Jane Doe", "Jane Doe", "Carol White"]);

        let mapping =
            execute_matching(&refs, &wg, &HeuristicsConfig::default(), &MatchConfig::default())
                .unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.reference_for("Jane Doe"), Some("Jane Doe"));
        assert!(!mapping.contains_member("Carol White"));
    }

    #[test]
    fn test_missing_author_is_named() {
        let refs = vec![
            ReferenceAuthor::new("Jane Doe", &["1"]),
            ReferenceAuthor::new("Zed Zulu", &["2"]),
        ];
        let wg = members(&["Jane Doe", "Carol White"]);

        let err =
            execute_matching(&refs, &wg, &HeuristicsConfig::default(), &MatchConfig::default())
                .unwrap_err();

        assert!(err.is_data_integrity());
        assert!(err.to_string().contains("Zed Zulu"));
        match err {
            CiteError::UnmatchedAuthors(names) => assert_eq!(names, vec!["Zed Zulu".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_count_details_name_missing_authors() {
        let refs = vec![
            ReferenceAuthor::new("Jane Doe", &["1"]),
            ReferenceAuthor::new("Zed Zulu", &["2"]),
        ];
        let result = match_authors(&refs, &members(&["Jane Doe"]), &HeuristicsConfig::default());

        assert_eq!(result.count_mismatch_details(), vec!["Zed Zulu matched nothing".to_string()]);
    }

    #[test]
    fn test_misspellings_reported_as_batch() {
        let refs = vec![
            ReferenceAuthor::new("Jane A. Doe", &["1"]),
            ReferenceAuthor::new("Robert Smith", &["2"]),
        ];
        let wg = members(&["Jane Doe", "Rob Smith"]);

        let err =
            execute_matching(&refs, &wg, &HeuristicsConfig::default(), &MatchConfig::default())
                .unwrap_err();

        match err {
            CiteError::MisspeltAuthors(pairs) => {
                assert_eq!(pairs.len(), 2);
                assert!(pairs.contains(&("Jane Doe".to_string(), "Jane A. Doe".to_string())));
                assert!(pairs.contains(&("Rob Smith".to_string(), "Robert Smith".to_string())));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_spelling_variants_allowed() {
        let refs = vec![ReferenceAuthor::new("Jane A. Doe", &["1", "2"])];
        let wg = members(&["Jane Doe"]);
        let config = MatchConfig {
            allow_spelling_variants: true,
            ..Default::default()
        };

        let mapping = execute_matching(&refs, &wg, &HeuristicsConfig::default(), &config).unwrap();

        assert_eq!(mapping.reference_for("Jane Doe"), Some("Jane A. Doe"));
    }

    #[test]
    fn test_ambiguous_candidates_strict() {
        let refs = vec![ReferenceAuthor::new("Jane Doe", &["1"])];
        let wg = members(&["Jane Doe", "Janet Doe"]);

        let err =
            execute_matching(&refs, &wg, &HeuristicsConfig::default(), &MatchConfig::default())
                .unwrap_err();

        match err {
            CiteError::AmbiguousCandidates(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].0, "Jane Doe");
                assert_eq!(entries[0].1, vec!["Jane Doe", "Janet Doe"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ambiguous_candidates_lenient_falls_back_to_count() {
        let refs = vec![ReferenceAuthor::new("Jane Doe", &["1"])];
        let wg = members(&["Jane Doe", "Janet Doe"]);
        let config = MatchConfig {
            strict_candidates: false,
            ..Default::default()
        };

        let err = execute_matching(&refs, &wg, &HeuristicsConfig::default(), &config).unwrap_err();

        match err {
            CiteError::MatchCountMismatch { expected, found, details } => {
                assert_eq!((expected, found), (1, 2));
                assert_eq!(details, vec!["Jane Doe matched Jane Doe, Janet Doe".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shared_member_is_count_mismatch() {
        let refs = vec![
            ReferenceAuthor::new("Jane Doe", &["1"]),
            ReferenceAuthor::new("Jane M. Doe", &["2"]),
        ];
        let wg = members(&["Jane Doe"]);

        let err =
            execute_matching(&refs, &wg, &HeuristicsConfig::default(), &MatchConfig::default())
                .unwrap_err();

        match err {
            CiteError::MatchCountMismatch { details, .. } => {
                assert_eq!(details, vec!["Jane Doe claimed by Jane Doe, Jane M. Doe".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
