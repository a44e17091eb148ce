//! Command-line interface for hit-cluster.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **combine**: Merge session files searched with the same queries
//! - **format**: Render sessions as summary or binary tables
//! - **rescore**: Recompute cluster scores, optionally with synteny
//! - **inspect**: Show organisms, scaffolds and top clusters of sessions
//! - **hits**: Parse and filter a tabular BLAST/DIAMOND hit table
//!
//! ## Usage
//!
//! ```text
//! # Merge two searches
//! hit-cluster combine run1.json run2.json.gz -o combined.json
//!
//! # Binary presence/absence table as CSV
//! hit-cluster format combined.json --kind binary --delimiter ,
//!
//! # Score conserved gene order
//! hit-cluster rescore combined.json --synteny -o rescored.json
//! ```

use clap::{Parser, Subcommand};

pub mod combine;
pub mod format;
pub mod hits;
pub mod inspect;
pub mod rescore;

#[derive(Parser)]
#[command(name = "hit-cluster")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Aggregate homology search hits into scored gene cluster sessions")]
#[command(
    long_about = "hit-cluster works with session files: JSON records of a homology search grouped into organisms, scaffolds, subjects and scored clusters of co-located hits.\n\nSessions can be merged, rescored with synteny, inspected, and rendered as summary or binary tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge sessions searched with the same queries
    Combine(combine::CombineArgs),

    /// Render sessions as a summary or binary table
    Format(format::FormatArgs),

    /// Recompute cluster scores
    Rescore(rescore::RescoreArgs),

    /// Describe the contents of sessions
    Inspect(inspect::InspectArgs),

    /// Parse and filter a tabular hit file
    Hits(hits::HitsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
