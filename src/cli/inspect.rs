use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::session::Session;

#[derive(Args)]
pub struct InspectArgs {
    /// Session files; several are merged before inspection
    #[arg(required = true)]
    pub sessions: Vec<PathBuf>,

    /// Number of top clusters to list per scaffold
    #[arg(short = 'n', long, default_value = "3")]
    pub top: usize,
}

pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let session =
        Session::from_files(args.sessions.as_slice()).context("Failed to load sessions")?;

    if verbose {
        eprintln!("Inspecting {} session files", args.sessions.len());
    }

    match format {
        OutputFormat::Text => print_text(&session, args.top),
        OutputFormat::Json => print_json(&session)?,
        OutputFormat::Tsv => print_tsv(&session),
    }

    Ok(())
}

fn print_text(session: &Session, top: usize) {
    println!("{session}");
    println!("Queries: {}", session.queries.join(", "));

    for organism in &session.organisms {
        println!("\n{organism}");
        for scaffold in organism.scaffolds.values() {
            println!("  {scaffold}");
            for cluster in scaffold.clusters().iter().take(top) {
                let labels: Vec<&str> = scaffold
                    .cluster_subjects(cluster)
                    .into_iter()
                    .map(|subject| subject.label())
                    .collect();
                println!(
                    "    {}-{}  score {:.4}  [{}]",
                    cluster.start(),
                    cluster.end(),
                    cluster.score(),
                    labels.join(", ")
                );
            }
        }
    }
}

fn print_json(session: &Session) -> anyhow::Result<()> {
    let organisms: Vec<serde_json::Value> = session
        .organisms
        .iter()
        .map(|organism| {
            let scaffolds: Vec<serde_json::Value> = organism
                .scaffolds
                .values()
                .map(|scaffold| {
                    serde_json::json!({
                        "accession": scaffold.accession,
                        "subjects": scaffold.subjects().len(),
                        "clusters": scaffold.clusters().len(),
                        "best_score": scaffold.clusters().first().map(|c| c.score()),
                    })
                })
                .collect();
            serde_json::json!({
                "name": organism.full_name(),
                "subjects": organism.total_subjects(),
                "clusters": organism.total_hit_clusters(),
                "scaffolds": scaffolds,
            })
        })
        .collect();

    let output = serde_json::json!({
        "queries": session.queries,
        "params": session.params,
        "clusters": session.total_hit_clusters(),
        "organisms": organisms,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(session: &Session) {
    println!("organism\tscaffold\tsubjects\tclusters\tbest_score");
    for organism in &session.organisms {
        let name = organism.full_name();
        for scaffold in organism.scaffolds.values() {
            let best = scaffold
                .clusters()
                .first()
                .map_or_else(|| "-".to_string(), |c| format!("{:.4}", c.score()));
            println!(
                "{}\t{}\t{}\t{}\t{}",
                name,
                scaffold.accession,
                scaffold.subjects().len(),
                scaffold.clusters().len(),
                best
            );
        }
    }
}
