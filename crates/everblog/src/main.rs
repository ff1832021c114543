//! Everblog CLI - renders Evernote notes as HTML.
//!
//! Provides commands for:
//! - `render`: Convert an ENML note body and its resources to HTML

mod commands;
mod error;
mod manifest;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// Everblog - Evernote notebooks as a blog.
#[derive(Parser)]
#[command(name = "everblog", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an ENML note to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    let (verbose, quiet) = match &cli.command {
        Commands::Render(args) => (args.verbose, args.quiet),
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
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
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        Output::new(quiet).error(&err.to_string());
        std::process::exit(1);
    }
}
