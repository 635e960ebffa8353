//! sitenav CLI - site navigation configuration tool.
//!
//! Provides commands for:
//! - `check`: Validate a site configuration
//! - `tree`: Print the sidebar in traversal order
//! - `export`: Write the normalized configuration as TOML, JSON or YAML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, TreeArgs};
use output::Output;

/// sitenav - Site navigation configuration tool.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    /// Enable verbose output (log configuration loading).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration.
    Check(CheckArgs),
    /// Print the sidebar tree.
    Tree(TreeArgs),
    /// Export the normalized configuration.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Tree(args) => args.execute(&output),
        Commands::Export(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
