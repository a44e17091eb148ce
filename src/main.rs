use clap::Parser;
use tracing_subscriber::EnvFilter;

use hit_cluster::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("hit_cluster=debug,info")
    } else {
        EnvFilter::new("hit_cluster=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Combine(args) => {
            cli::combine::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Format(args) => {
            cli::format::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Rescore(args) => {
            cli::rescore::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Inspect(args) => {
            cli::inspect::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Hits(args) => {
            cli::hits::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
