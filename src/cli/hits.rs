use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::tabular::{group_by_subject, parse_hits_file, HitFilter};

#[derive(Args)]
pub struct HitsArgs {
    /// Tabular hit file: qseqid sseqid pident qcovhsp evalue bitscore
    #[arg(required = true)]
    pub table: PathBuf,

    /// Minimum percent identity
    #[arg(long, default_value = "30")]
    pub min_identity: f64,

    /// Minimum percent query coverage
    #[arg(long, default_value = "50")]
    pub min_coverage: f64,

    /// Maximum e-value
    #[arg(long, default_value = "0.01")]
    pub max_evalue: f64,

    /// Decimal places for scores
    #[arg(long, default_value = "4")]
    pub decimals: u32,
}

pub fn run(args: HitsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let filter = HitFilter {
        min_identity: args.min_identity,
        min_coverage: args.min_coverage,
        max_evalue: args.max_evalue,
    };

    let hits = parse_hits_file(&args.table, &filter)
        .with_context(|| format!("Failed to parse {}", args.table.display()))?;

    if verbose {
        eprintln!("Kept {} hits from {}", hits.len(), args.table.display());
    }

    match format {
        OutputFormat::Text => {
            let subjects = group_by_subject(hits);
            println!("{} subjects", subjects.len());
            for subject in &subjects {
                println!("\n{}", subject.label());
                for hit in &subject.hits {
                    println!("  {hit}");
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
        OutputFormat::Tsv => {
            println!("query\tsubject\tidentity\tcoverage\tevalue\tbitscore");
            for hit in &hits {
                println!("{}", hit.values(args.decimals).join("\t"));
            }
        }
    }

    Ok(())
}
