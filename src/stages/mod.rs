pub mod stage0_match;
pub mod stage1_affiliations;
pub mod stage2_merge;
pub mod stage3_dedupe;
pub mod stage4_render;

pub use stage0_match::*;
pub use stage1_affiliations::*;
pub use stage2_merge::*;
pub use stage3_dedupe::*;
pub use stage4_render::*;

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::io::{CitationBlock, CitationReport, MatchedAuthor, ReportMetadata};
use crate::models::{AffiliationLookup, MatchMapping, MergedTable, ReferenceAuthor, RosterRow};

/// Everything produced by a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub mapping: MatchMapping,
    pub table: MergedTable,
    pub dedupe: DedupeResult,
    pub citation: CitationBlock,
    pub reference_authors: usize,
}

impl PipelineOutcome {
    /// Summarize the run for the JSON report
    pub fn report(&self) -> CitationReport {
        CitationReport {
            matches: self
                .mapping
                .iter()
                .map(|(member, reference)| MatchedAuthor {
                    member: member.to_string(),
                    reference: reference.to_string(),
                })
                .collect(),
            merged_affiliations: self.dedupe.merged_pairs.clone(),
            affiliations: self.citation.affiliations.clone(),
            metadata: ReportMetadata {
                reference_authors: self.reference_authors,
                reference_rows: self.table.reference_rows().len(),
                member_rows: self.table.member_rows().len(),
                distinct_affiliations: self.citation.affiliations.len(),
            },
        }
    }
}

/// Run matching through rendering on loaded records
///
/// Data-integrity and lookup failures surface before any formatting work,
/// and nothing is written by this function.
pub fn run_pipeline(
    references: &[ReferenceAuthor],
    lookup: &AffiliationLookup,
    roster: Vec<RosterRow>,
    config: &PipelineConfig,
) -> Result<PipelineOutcome> {
    info!("Stage 0: Matching reference authors against the working group...");
    let member_names: Vec<String> = roster.iter().map(|r| r.author.clone()).collect();
    let mapping = execute_matching(references, &member_names, &config.heuristics, &config.matching)?;

    info!("Stage 1: Resolving reference affiliations...");
    let reference_rows = expand_reference_affiliations(references, lookup)?;

    info!("Stage 2: Merging author and member tables...");
    let mut table = merge_tables(reference_rows, roster, &mapping)?;

    info!("Stage 3: Checking for near-duplicate affiliations...");
    let dedupe = dedupe_affiliations(&mut table, &config.heuristics, &config.dedupe);

    info!("Stage 4: Rendering citation block...");
    let citation = render_citation(&table, &config.render);

    Ok(PipelineOutcome {
        mapping,
        table,
        dedupe,
        citation,
        reference_authors: references.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CiteError;

    fn lookup() -> AffiliationLookup {
        [("1", "Dept X, Uni A, USA"), ("2", "Dept Y, Uni B, UK")]
            .into_iter()
            .collect()
    }

    fn variants_allowed() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.matching.allow_spelling_variants = true;
        config
    }

    #[test]
    fn test_single_reference_author() {
        let references = vec![ReferenceAuthor::new("Jane A. Doe", &["1", "2"])];
        let roster = vec![RosterRow::new("Jane Doe", "Dept X, Uni A, USA")];

        let outcome = run_pipeline(&references, &lookup(), roster, &variants_allowed()).unwrap();

        assert_eq!(outcome.table.rows.len(), 2);
        assert!(outcome.table.rows.iter().all(|r| r.author == "Jane A. Doe"));
        assert_eq!(
            outcome.citation.paper_authors,
            "Jane A. Doe<sup>1</sup><sup>, </sup><sup>2</sup>International Immuno-Oncology Biomarker Working Group<sup>*</sup>"
        );
        assert!(outcome.citation.paper_affiliations.contains("<sup>1 </sup>Dept X, Uni A, USA"));
        assert!(outcome.citation.paper_affiliations.contains("<sup>2 </sup>Dept Y, Uni B, UK"));
        assert!(outcome.citation.member_authors.is_empty());
        assert!(outcome.citation.member_affiliations.is_empty());
    }

    #[test]
    fn test_misspelling_aborts_by_default() {
        let references = vec![ReferenceAuthor::new("Jane A. Doe", &["1", "2"])];
        let roster = vec![RosterRow::new("Jane Doe", "Dept X, Uni A, USA")];

        let err = run_pipeline(&references, &lookup(), roster, &PipelineConfig::default()).unwrap_err();

        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_unknown_code_aborts() {
        let references = vec![ReferenceAuthor::new("Jane Doe", &["3"])];
        let roster = vec![RosterRow::new("Jane Doe", "Dept X, Uni A, USA")];

        let err = run_pipeline(&references, &lookup(), roster, &PipelineConfig::default()).unwrap_err();

        assert!(matches!(err, CiteError::UnknownAffiliationCode { .. }));
    }

    #[test]
    fn test_members_and_merged_affiliations() {
        let references = vec![
            ReferenceAuthor::new("Jane Doe", &["1"]),
            ReferenceAuthor::new("Bob Smith", &["2"]),
        ];
        let roster = vec![
            RosterRow::new("Zoe Young", "Dept Y, Uni Bonn, UK"),
            RosterRow::new("Jane Doe", "Dept X, Uni A, USA"),
            RosterRow::new("Bob Smith", "Dept Y, Uni B, UK"),
            RosterRow::new("Adam Ant", "Dept Z, Uni C, France"),
            RosterRow::new("Adam Ant", "Dept X, Uni A, USA"),
        ];

        let outcome = run_pipeline(&references, &lookup(), roster, &PipelineConfig::default()).unwrap();

        // The longer spelling wins, including for the reference author's row
        assert_eq!(outcome.dedupe.merged_pairs.len(), 1);
        assert_eq!(outcome.dedupe.merged_pairs[0].canonical, "Dept Y, Uni Bonn, UK");
        assert_eq!(outcome.table.rows[1].affiliation, "Dept Y, Uni Bonn, UK");

        assert_eq!(outcome.table.first_member, 2);
        assert!(outcome.table.is_contiguous());
        assert_eq!(
            outcome.citation.paper_authors,
            "Jane Doe<sup>1</sup>, Bob Smith<sup>2</sup>, International Immuno-Oncology Biomarker Working Group<sup>*</sup>"
        );
        assert_eq!(
            outcome.citation.member_authors,
            "Adam Ant<sup>3</sup><sup>, </sup><sup>1</sup>, Zoe Young<sup>2</sup>"
        );
        assert_eq!(outcome.citation.member_affiliations, "<sup>3 </sup>Dept Z, Uni C, France");

        let report = outcome.report();
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.metadata.member_rows, 3);
        assert_eq!(report.metadata.distinct_affiliations, 3);
    }
}
