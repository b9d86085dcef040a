//! # geofeed CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geofeed_cli::generate::{run_generate, GenerateArgs};
use geofeed_cli::validate::{run_validate, ValidateArgs};

/// RFC 8805 geofeed toolkit.
///
/// Validates self-published IP geolocation feeds and generates them from a
/// static subnet-to-location configuration, with a mandatory pre-publish
/// self-check.
#[derive(Parser, Debug)]
#[command(name = "geofeed", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a feed from a file or stdin; exit non-zero on any error.
    Validate(ValidateArgs),

    /// Generate a feed from a YAML configuration, self-checking it first.
    Generate(GenerateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Generate(args) => run_generate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
