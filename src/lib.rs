pub mod config;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod stages;

pub use config::PipelineConfig;
pub use error::CiteError;
pub use heuristics::{affiliations_similar, names_match, HeuristicsConfig};
pub use io::{
    parse_affiliation_lookup_file, parse_reference_authors_file, parse_roster_file, CitationBlock,
    CitationReport,
};
pub use models::{
    AffiliationLookup, AffiliationMergeMap, AffiliationRecord, AuthorRecord, MatchMapping,
    MergedTable, ReferenceAuthor, RosterRow,
};
pub use stages::{
    dedupe_affiliations, execute_matching, expand_reference_affiliations, match_authors,
    merge_tables, render_citation, run_pipeline, verify_matches, DedupeConfig, MatchConfig,
    PipelineOutcome, RenderConfig,
};
