use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::serialization::JsonCodec;
use crate::core::session::Session;
use crate::output::FormatOptions;

#[derive(Args)]
pub struct FormatArgs {
    /// Session files; several are merged before formatting
    #[arg(required = true)]
    pub sessions: Vec<PathBuf>,

    /// Table to produce: summary or binary
    #[arg(short, long, default_value = "summary")]
    pub kind: String,

    /// Decimal places for scores
    #[arg(long, default_value = "4")]
    pub decimals: u32,

    /// Cell delimiter; columns are space-aligned when omitted
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Omit header rows
    #[arg(long)]
    pub hide_headers: bool,

    /// Write the table to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: FormatArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let session =
        Session::from_files(args.sessions.as_slice()).context("Failed to load sessions")?;

    if verbose {
        eprintln!("Loaded {session}");
    }

    let text = match format {
        OutputFormat::Json => session.to_json_pretty()?,
        OutputFormat::Text | OutputFormat::Tsv => {
            let delimiter = match (format, args.delimiter) {
                (_, Some(delimiter)) => Some(delimiter),
                (OutputFormat::Tsv, None) => Some("\t".to_string()),
                _ => None,
            };
            let options = FormatOptions {
                decimals: args.decimals,
                hide_headers: args.hide_headers,
                delimiter,
            };
            session.format(&args.kind, &options)?
        }
    };

    match &args.output {
        Some(path) => std::fs::write(path, format!("{text}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{text}"),
    }

    Ok(())
}
