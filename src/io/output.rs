use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::AffiliationRecord;
use crate::stages::MergedPair;

const LINE_BREAK: &str = "<br />";
const SECTION_BREAK: &str = "<br /> <br />";

/// The four rendered sections of the author list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationBlock {
    /// Paper authors, ending with the working-group credit
    pub paper_authors: String,
    /// Paper affiliations, ending with the member-list footnote
    pub paper_affiliations: String,
    /// Working-group-only members
    pub member_authors: String,
    /// Affiliations first introduced by working-group-only members
    pub member_affiliations: String,
    /// Every numbered affiliation, in index order
    pub affiliations: Vec<AffiliationRecord>,
}

impl CitationBlock {
    /// Format as a single HTML fragment with four labeled sections
    pub fn to_html(&self) -> String {
        let sections = [
            ("Authors:", &self.paper_authors),
            ("Affiliations:", &self.paper_affiliations),
            ("Working Group members:", &self.member_authors),
            ("Working Group affiliations:", &self.member_affiliations),
        ];

        sections
            .iter()
            .map(|(label, body)| format!("<b>{}</b>{}{}", label, LINE_BREAK, body))
            .collect::<Vec<_>>()
            .join(SECTION_BREAK)
    }

    /// Write the HTML fragment to a file
    pub fn write_html(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.to_html())?;
        Ok(())
    }
}

/// Machine-readable summary of a run
#[derive(Debug, Clone, Serialize)]
pub struct CitationReport {
    /// Working-group spelling and reference spelling of each matched author
    pub matches: Vec<MatchedAuthor>,
    /// Affiliation pairs merged by the deduplicator
    pub merged_affiliations: Vec<MergedPair>,
    /// Numbered affiliations as rendered
    pub affiliations: Vec<AffiliationRecord>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedAuthor {
    pub member: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub reference_authors: usize,
    pub reference_rows: usize,
    pub member_rows: usize,
    pub distinct_affiliations: usize,
}

impl CitationReport {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}
