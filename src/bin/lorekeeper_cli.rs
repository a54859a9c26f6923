//! Lorekeeper CLI - search session transcripts from the command line
//!
//! # Examples
//!
//! ```bash
//! # Build the index from ./output (or the configured source root)
//! lorekeeper index
//!
//! # Rebuild from scratch, ignoring the snapshot
//! lorekeeper index --force
//!
//! # Search in-character lines by one speaker, with context
//! lorekeeper search "dragon" --speaker Alice --classification ic --context
//!
//! # Regex search exported as a Markdown report
//! lorekeeper search "(dragon|wyvern)" --mode regex --export document -o dragons.md
//!
//! # List sessions
//! lorekeeper list-sessions
//! ```

use clap::Parser;
use lorekeeper::cli::output::print_error;
use lorekeeper::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout stays clean for results and JSON output
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("lorekeeper=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lorekeeper=warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
