//! mdkirby CLI - MkDocs to Kirby content converter.
//!
//! Provides commands for:
//! - `build`: Export the documentation into a Kirby content tree
//! - `tree`: Print the destination of every content file without writing

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, TreeArgs};
use output::Output;

/// mdkirby - MkDocs to Kirby content converter.
#[derive(Parser)]
#[command(name = "mdkirby", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the documentation into a Kirby content tree.
    Build(BuildArgs),
    /// Print the content files a build would write.
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Build(args) => args.project.verbose,
        Commands::Tree(args) => args.project.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}
