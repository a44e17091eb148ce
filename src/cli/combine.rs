use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::session::Session;

#[derive(Args)]
pub struct CombineArgs {
    /// Session files to merge, in order (.json or .json.gz)
    #[arg(required = true)]
    pub sessions: Vec<PathBuf>,

    /// Output session file; gzip-compressed if it ends in .gz
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: CombineArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let session =
        Session::from_files(args.sessions.as_slice()).context("Failed to combine sessions")?;

    if verbose {
        eprintln!(
            "Merged {} sessions: {} organisms, {} clusters",
            args.sessions.len(),
            session.organisms.len(),
            session.total_hit_clusters()
        );
    }

    session
        .to_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    match format {
        OutputFormat::Text => println!(
            "Wrote {} organisms from {} sessions to {}",
            session.organisms.len(),
            args.sessions.len(),
            args.output.display()
        ),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "output": args.output.display().to_string(),
                "sessions": args.sessions.len(),
                "organisms": session.organisms.len(),
                "clusters": session.total_hit_clusters(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("output\tsessions\torganisms\tclusters");
            println!(
                "{}\t{}\t{}\t{}",
                args.output.display(),
                args.sessions.len(),
                session.organisms.len(),
                session.total_hit_clusters()
            );
        }
    }

    Ok(())
}
