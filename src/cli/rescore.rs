use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::session::Session;

#[derive(Args)]
pub struct RescoreArgs {
    /// Session file to rescore
    #[arg(required = true)]
    pub session: PathBuf,

    /// Add a synteny bonus for clusters that conserve query order
    #[arg(long)]
    pub synteny: bool,

    /// Output session file; gzip-compressed if it ends in .gz
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: RescoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut session = Session::from_file(&args.session)
        .with_context(|| format!("Failed to load {}", args.session.display()))?;

    session.rescore(args.synteny)?;

    if verbose {
        eprintln!(
            "Rescored {} clusters (synteny: {})",
            session.total_hit_clusters(),
            args.synteny
        );
    }

    session
        .to_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let best = session
        .organisms
        .iter()
        .flat_map(|organism| organism.clusters())
        .map(|cluster| cluster.score())
        .fold(None, |best: Option<f64>, score| {
            Some(best.map_or(score, |b| b.max(score)))
        });

    match format {
        OutputFormat::Text => {
            println!(
                "Rescored {} clusters, written to {}",
                session.total_hit_clusters(),
                args.output.display()
            );
            if let Some(best) = best {
                println!("Best cluster score: {best:.4}");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "output": args.output.display().to_string(),
                "clusters": session.total_hit_clusters(),
                "synteny": args.synteny,
                "best_score": best,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("output\tclusters\tsynteny\tbest_score");
            println!(
                "{}\t{}\t{}\t{}",
                args.output.display(),
                session.total_hit_clusters(),
                args.synteny,
                best.map_or_else(|| "-".to_string(), |b| format!("{b:.4}"))
            );
        }
    }

    Ok(())
}
