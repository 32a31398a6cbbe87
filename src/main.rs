use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wgcite::stages::find_similar_affiliations;
use wgcite::{
    expand_reference_affiliations, match_authors, parse_affiliation_lookup_file,
    parse_reference_authors_file, parse_roster_file, run_pipeline, verify_matches, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "wgcite")]
#[command(author, version, about = "Working-group author list reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Reference author file (`Name | code1, code2` per line)
    #[arg(short, long)]
    authors: PathBuf,

    /// Affiliation lookup file (`code. Full affiliation` per line)
    #[arg(long)]
    affiliations: PathBuf,

    /// Working-group roster CSV with `auth` and `affil` columns
    #[arg(short, long)]
    roster: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the rosters and write the formatted author list
    Format {
        #[command(flatten)]
        input: InputArgs,

        /// Output file for the HTML author list
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Leading characters of the first name that must agree
        #[arg(long)]
        first_name_chars: Option<usize>,

        /// Leading characters of the last name that must agree
        #[arg(long)]
        last_name_chars: Option<usize>,

        /// Accept working-group spellings that differ from the reference list
        #[arg(long)]
        allow_spelling_variants: bool,

        /// Do not fail when one author matches several working-group names
        #[arg(long)]
        lenient_candidates: bool,
    },

    /// Report matching and affiliation problems without writing output
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Format {
            input,
            output,
            report,
            first_name_chars,
            last_name_chars,
            allow_spelling_variants,
            lenient_candidates,
        } => {
            setup_logging(input.verbose);
            let mut config = load_config(input.config.as_deref())?;
            if let Some(n) = first_name_chars {
                config.heuristics.first_name_chars = n;
            }
            if let Some(n) = last_name_chars {
                config.heuristics.last_name_chars = n;
            }
            if allow_spelling_variants {
                config.matching.allow_spelling_variants = true;
            }
            if lenient_candidates {
                config.matching.strict_candidates = false;
            }
            format_author_list(&input, &output, report.as_deref(), &config)
        }
        Commands::Analyze { input } => {
            setup_logging(input.verbose);
            let config = load_config(input.config.as_deref())?;
            analyze_rosters(&input, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            PipelineConfig::from_file(path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn format_author_list(
    input: &InputArgs,
    output: &Path,
    report: Option<&Path>,
    config: &PipelineConfig,
) -> Result<()> {
    info!("Loading reference authors from {:?}", input.authors);
    let references = parse_reference_authors_file(&input.authors)?;
    let lookup = parse_affiliation_lookup_file(&input.affiliations)?;
    let roster = parse_roster_file(&input.roster)?;

    info!(
        "Loaded {} reference authors, {} affiliation codes, {} roster rows",
        references.len(),
        lookup.len(),
        roster.len()
    );

    let outcome = run_pipeline(&references, &lookup, roster, config)
        .context("Author list reconciliation failed")?;

    outcome.citation.write_html(output)?;
    info!("Author list written to {:?}", output);

    if let Some(path) = report {
        outcome.report().write_json(path)?;
        info!("Report written to {:?}", path);
    }

    info!(
        "Complete: {} paper authors, {} working-group members, {} affiliations ({} merged)",
        references.len(),
        outcome.table.authors().len().saturating_sub(references.len()),
        outcome.citation.affiliations.len(),
        outcome.dedupe.merged_pairs.len()
    );

    Ok(())
}

fn analyze_rosters(input: &InputArgs, config: &PipelineConfig) -> Result<()> {
    let references = parse_reference_authors_file(&input.authors)?;
    let lookup = parse_affiliation_lookup_file(&input.affiliations)?;
    let roster = parse_roster_file(&input.roster)?;

    let member_names: Vec<String> = roster.iter().map(|r| r.author.clone()).collect();
    let result = match_authors(&references, &member_names, &config.heuristics);

    println!("Roster Analysis");
    println!("===============");
    println!("Reference authors: {}", references.len());
    println!("Roster rows: {}", roster.len());
    println!("Matched spellings: {}", result.mapping.len());
    println!();

    println!("Author Matching");
    println!("---------------");
    for (reference, candidates) in result.ambiguous() {
        println!("Ambiguous: {} <- {}", reference, candidates.join(" | "));
    }
    for name in &result.unmatched {
        println!("Unmatched: {}", name);
    }
    for (member, reference) in result.mapping.misspellings() {
        println!("Misspelt: {} (reference: {})", member, reference);
    }
    match verify_matches(&result, references.len(), &config.matching) {
        Ok(()) => println!("All reference authors matched"),
        Err(e) => println!("Matching would fail: {}", e),
    }
    println!();

    let mut affiliations: Vec<String> = roster.iter().map(|r| r.affiliation.clone()).collect();
    match expand_reference_affiliations(&references, &lookup) {
        Ok(rows) => affiliations.extend(rows.into_iter().map(|r| r.affiliation)),
        Err(e) => warn!("Skipping reference affiliations: {}", e),
    }
    affiliations.sort();
    affiliations.dedup();

    let dedupe = find_similar_affiliations(&affiliations, &config.heuristics, &config.dedupe);

    println!("Affiliations");
    println!("------------");
    println!("Distinct affiliations: {}", affiliations.len());
    println!("Suspiciously similar pairs: {}", dedupe.merged_pairs.len());
    for pair in &dedupe.merged_pairs {
        println!();
        println!("{}", pair.duplicate);
        println!("{}", pair.canonical);
    }

    Ok(())
}
