use tracing::info;

use crate::error::{CiteError, Result};
use crate::models::{AffiliationLookup, AuthorRecord, ReferenceAuthor, RosterRow};

/// Resolve one reference author's codes to full affiliation text
pub fn resolve_author(author: &ReferenceAuthor, lookup: &AffiliationLookup) -> Result<AuthorRecord> {
    let affiliations = author
        .affiliation_codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(|code| {
            lookup
                .get(code)
                .map(str::to_string)
                .ok_or_else(|| CiteError::UnknownAffiliationCode {
                    author: author.name.clone(),
                    code: code.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AuthorRecord {
        name: author.name.clone(),
        affiliations,
    })
}

/// Expand reference authors into one row per affiliation, in input order
pub fn expand_reference_affiliations(
    authors: &[ReferenceAuthor],
    lookup: &AffiliationLookup,
) -> Result<Vec<RosterRow>> {
    let mut rows = Vec::new();
    for author in authors {
        rows.extend(resolve_author(author, lookup)?.into_rows());
    }

    info!(
        "Expanded {} reference authors into {} affiliation rows",
        authors.len(),
        rows.len()
    );

    Ok(rows)
}
