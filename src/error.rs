//! Error types for roster reconciliation.

use thiserror::Error;

/// Fatal conditions raised by the reconciliation stages.
///
/// Every variant carries the full list of offending entries so a single run
/// reports everything that needs fixing in the source data.
#[derive(Debug, Error)]
pub enum CiteError {
    // === Data integrity ===
    /// A reference author matched several distinct working-group spellings.
    #[error("ambiguous working-group matches:\n{}", format_candidates(.0))]
    AmbiguousCandidates(Vec<(String, Vec<String>)>),

    /// Matched spellings do not pair up one-to-one with reference authors.
    #[error(
        "suspiciously duplicate authors found in working group: {found} matches for {expected} reference authors\n{}",
        .details.join("\n")
    )]
    MatchCountMismatch {
        expected: usize,
        found: usize,
        details: Vec<String>,
    },

    /// Reference authors missing from the working-group roster.
    #[error("these authors need manual fixing: {}", .0.join(", "))]
    UnmatchedAuthors(Vec<String>),

    /// Working-group spellings that differ from the reference spelling.
    #[error("the following authors are misspelt in the working group:\n{}", format_pairs(.0))]
    MisspeltAuthors(Vec<(String, String)>),

    // === Lookup ===
    /// An affiliation code has no entry in the lookup file.
    #[error("unknown affiliation code '{code}' for author {author}")]
    UnknownAffiliationCode { author: String, code: String },

    // === Table shape ===
    /// Rows of one author are split by another author.
    #[error("rows are not contiguous for: {}", .0.join(", "))]
    NonContiguousAuthor(Vec<String>),
}

impl CiteError {
    /// True for the matching failures that signal bad roster data.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousCandidates(_)
                | Self::MatchCountMismatch { .. }
                | Self::UnmatchedAuthors(_)
                | Self::MisspeltAuthors(_)
        )
    }
}

fn format_candidates(entries: &[(String, Vec<String>)]) -> String {
    entries
        .iter()
        .map(|(reference, candidates)| format!("{} <- {}", reference, candidates.join(" | ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(member, reference)| format!("{} (reference: {})", member, reference))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, CiteError>;
