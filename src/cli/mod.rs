//! CLI adapter for Lorekeeper
//!
//! Provides the command-line interface over the core index, search and
//! export services.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |      core/       |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lorekeeper - search your session transcripts
///
/// Indexes the per-session transcript artifacts of a campaign and
/// searches them by text, pattern or exact phrase, with speaker,
/// IC/OOC, session and time filters.
#[derive(Parser, Debug)]
#[command(name = "lorekeeper")]
#[command(version)]
#[command(about = "Search tabletop session transcripts", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Directory holding the session folders (overrides configuration)
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output for scripting
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build (or load) the transcript index
    Index(commands::IndexArgs),

    /// Search transcripts
    Search(commands::SearchArgs),

    /// List indexed sessions
    #[command(name = "list-sessions")]
    ListSessions(commands::sessions::ListSessionsArgs),

    /// List speakers across all sessions
    #[command(name = "list-speakers")]
    ListSpeakers(commands::sessions::ListSpeakersArgs),

    /// Delete the index snapshot so the next run rebuilds from source
    #[command(name = "clear-cache")]
    ClearCache(commands::ClearCacheArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  lorekeeper completions bash > ~/.local/share/bash-completion/completions/lorekeeper
    ///   zsh:   lorekeeper completions zsh > ~/.zfunc/_lorekeeper
    ///   fish:  lorekeeper completions fish > ~/.config/fish/completions/lorekeeper.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    // Load configuration
    let mut config = Config::load_with_xdg(&xdg)?;
    if let Some(source) = cli.source {
        config.indexing.source_root = source;
    }
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config)?);

    // Execute command
    match command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::ListSessions(args) => {
            commands::sessions::execute_list(args, &services, cli.format)
        }
        Commands::ListSpeakers(args) => {
            commands::sessions::execute_speakers(args, &services, cli.format)
        }
        Commands::ClearCache(args) => commands::cache::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => {
            commands::config::execute(args, &services, &xdg, cli.format)
        }
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
