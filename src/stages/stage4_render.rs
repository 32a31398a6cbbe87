use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::io::CitationBlock;
use crate::models::{AffiliationRecord, MergedTable, RosterRow};

/// Leading separator written before every author and affiliation entry
const SEPARATOR: &str = ", ";

/// Configuration for citation rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Group credit appended to the paper author list
    pub working_group_name: String,
    /// Footnote appended to the paper affiliation list
    pub footnote: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            working_group_name: "International Immuno-Oncology Biomarker Working Group".to_string(),
            footnote: "A full list of members and their affiliations is available at the end of the manuscript."
                .to_string(),
        }
    }
}

/// Running state of the single pass over the merged table
#[derive(Debug, Default)]
struct RenderState {
    index_by_affiliation: HashMap<String, usize>,
    emitted_authors: HashSet<String>,
    affiliations: Vec<AffiliationRecord>,
    author_buffer: String,
    affil_buffer: String,
    /// Buffer offsets at the first working-group-only row
    boundary: Option<(usize, usize)>,
}

impl RenderState {
    fn next_index(&self) -> usize {
        self.affiliations.len() + 1
    }

    fn push_row(mut self, position: usize, row: &RosterRow, first_member: usize) -> Self {
        if position == first_member {
            self.boundary = Some((self.author_buffer.len(), self.affil_buffer.len()));
        }

        if self.emitted_authors.contains(&row.author) {
            self.author_buffer.push_str("<sup>, </sup>");
        } else {
            self.author_buffer.push_str(SEPARATOR);
            self.author_buffer.push_str(&row.author);
        }

        let known = self.index_by_affiliation.get(&row.affiliation).copied();
        let index = match known {
            Some(index) => index,
            None => {
                let index = self.next_index();
                self.index_by_affiliation.insert(row.affiliation.clone(), index);
                self.affiliations.push(AffiliationRecord {
                    index,
                    canonical_text: row.affiliation.clone(),
                });
                let _ = write!(
                    self.affil_buffer,
                    "{}<sup>{} </sup>{}",
                    SEPARATOR, index, row.affiliation
                );
                index
            }
        };
        let _ = write!(self.author_buffer, "<sup>{}</sup>", index);

        self.emitted_authors.insert(row.author.clone());
        self
    }

    fn finish(self, config: &RenderConfig) -> CitationBlock {
        let authors = strip_separator(&self.author_buffer);
        let affils = strip_separator(&self.affil_buffer);

        // Offsets were taken before stripping, so splitting the stripped
        // buffer there keeps the trailing separator in the paper section.
        let (author_split, affil_split) = self
            .boundary
            .unwrap_or((authors.len(), affils.len()));
        let (paper_authors, member_authors) = authors.split_at(author_split.min(authors.len()));
        let (paper_affiliations, member_affiliations) =
            affils.split_at(affil_split.min(affils.len()));

        CitationBlock {
            paper_authors: format!("{}{}<sup>*</sup>", paper_authors, config.working_group_name),
            paper_affiliations: format!("{}<sup>* </sup>{}", paper_affiliations, config.footnote),
            member_authors: member_authors.to_string(),
            member_affiliations: member_affiliations.to_string(),
            affiliations: self.affiliations,
        }
    }
}

fn strip_separator(buffer: &str) -> &str {
    buffer.strip_prefix(SEPARATOR).unwrap_or(buffer)
}

/// Render the merged table into the four citation sections
///
/// Affiliation indices are assigned in first-seen order. The table must keep
/// each author's rows contiguous; a repeated author is rendered as a
/// superscript continuation of the previous entry.
pub fn render_citation(table: &MergedTable, config: &RenderConfig) -> CitationBlock {
    let state = table
        .rows
        .iter()
        .enumerate()
        .fold(RenderState::default(), |state, (position, row)| {
            state.push_row(position, row, table.first_member)
        });

    let block = state.finish(config);

    info!(
        "Rendered {} authors with {} numbered affiliations",
        table.authors().len(),
        block.affiliations.len()
    );

    block
}
