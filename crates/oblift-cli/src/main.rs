#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

mod commands;
mod diagnostic;
mod logging;

use clap::Parser;
use commands::InputArgs;
use miette::{IntoDiagnostic, Result};
use oblift_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oblift")]
#[command(author, version, about = "Parse object expressions and lift their literals to top-level definitions", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Read settings from a JSON config file
    #[arg(long, global = true, value_name = "FILE", env = "OBLIFT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Print the token stream
    Tokens(InputArgs),

    /// Parse and print the expression tree
    Parse(InputArgs),

    /// Parse, lift, and print definitions followed by the residual expression
    Lift(InputArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build config: file values first, flags on top
    let mut config = match &cli.config {
        Some(path) => Config::load(path).into_diagnostic()?,
        None => Config::default(),
    };
    if cli.verbose > 0 {
        config = config.with_verbosity(cli.verbose);
    }
    if cli.json {
        config = config.with_json_logs(true);
    }

    // Version handles its own output, no logging
    if matches!(cli.command, Commands::Version) {
        return commands::version::run(cli.json);
    }

    logging::init(config.verbosity, config.json_logs);
    tracing::debug!(?config, "loaded config");

    match &cli.command {
        Commands::Version => unreachable!(), // Handled above
        Commands::Tokens(input) => {
            let span = tracing::info_span!("tokens", cmd = "tokens");
            let _guard = span.enter();
            commands::tokens::run(input, cli.json)
        }
        Commands::Parse(input) => {
            let span = tracing::info_span!("parse", cmd = "parse");
            let _guard = span.enter();
            commands::parse::run(input, &config, cli.json)
        }
        Commands::Lift(input) => {
            let span = tracing::info_span!("lift", cmd = "lift");
            let _guard = span.enter();
            commands::lift::run(input, &config, cli.json)
        }
    }
}
