use tracing::info;

use crate::error::{CiteError, Result};
use crate::models::{MatchMapping, MergedTable, RosterRow};

/// Build the merged table: reference rows first, then working-group-only
/// rows sorted by name
///
/// Working-group rows whose author is already a reference author (a key of
/// `mapping`) are dropped. The sort is stable, so one member's affiliations
/// keep their roster order. Fails if any author's rows end up split.
pub fn merge_tables(
    reference_rows: Vec<RosterRow>,
    member_rows: Vec<RosterRow>,
    mapping: &MatchMapping,
) -> Result<MergedTable> {
    let total_members = member_rows.len();
    let mut members: Vec<RosterRow> = member_rows
        .into_iter()
        .filter(|row| !mapping.contains_member(&row.author))
        .collect();
    members.sort_by(|a, b| a.author.cmp(&b.author));

    let first_member = reference_rows.len();
    let mut rows = reference_rows;
    rows.extend(members);

    let table = MergedTable { rows, first_member };

    let split = table.split_authors();
    if !split.is_empty() {
        return Err(CiteError::NonContiguousAuthor(split));
    }

    info!(
        "Merged table: {} reference rows, {} member rows ({} dropped as reference authors)",
        table.reference_rows().len(),
        table.member_rows().len(),
        total_members - table.member_rows().len()
    );

    Ok(table)
}
