use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::{AffiliationLookup, ReferenceAuthor, RosterRow};

/// Separator between name and codes in the reference author file
const AUTHOR_SEPARATOR: &str = " | ";

/// Parse a reference author file (`Name | code1, code2` per line)
pub fn parse_reference_authors_file(path: &Path) -> Result<Vec<ReferenceAuthor>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_reference_authors(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Parse reference author lines; blank lines are skipped
pub fn parse_reference_authors(content: &str) -> Result<Vec<ReferenceAuthor>> {
    let mut authors = Vec::new();

    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((name, codes)) = line.split_once(AUTHOR_SEPARATOR) else {
            bail!("line {}: expected `Name | codes`, got {:?}", number + 1, line);
        };

        let name = name.trim();
        if name.is_empty() {
            bail!("line {}: empty author name", number + 1);
        }

        authors.push(ReferenceAuthor {
            name: name.to_string(),
            affiliation_codes: codes.split(',').map(|c| c.trim().to_string()).collect(),
        });
    }

    Ok(authors)
}

/// Parse an affiliation lookup file (`code. Full text` per line)
pub fn parse_affiliation_lookup_file(path: &Path) -> Result<AffiliationLookup> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_affiliation_lookup(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Parse lookup lines, splitting each at its first period
pub fn parse_affiliation_lookup(content: &str) -> Result<AffiliationLookup> {
    let mut lookup = AffiliationLookup::new();

    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((code, text)) = line.split_once('.') else {
            bail!("line {}: expected `code. affiliation`, got {:?}", number + 1, line);
        };
        lookup.insert(code.trim(), text.trim());
    }

    Ok(lookup)
}

/// Load the working-group CSV (`auth,affil` header)
pub fn parse_roster_file(path: &Path) -> Result<Vec<RosterRow>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_roster(file).with_context(|| format!("Failed to parse {:?}", path))
}

/// Parse working-group CSV rows from any reader, trimming every value
pub fn parse_roster<R: std::io::Read>(reader: R) -> Result<Vec<RosterRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (number, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record.with_context(|| format!("Invalid roster row {}", number + 1))?;
        rows.push(row);
    }

    Ok(rows)
}
