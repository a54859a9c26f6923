//! Config command - show current configuration

use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub config_file_present: bool,
    pub snapshot_path: String,
    #[serde(flatten)]
    pub config: Config,
}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();
    let config_file = xdg.config_file();

    let response = ConfigResponse {
        config_file: config_file.to_string_lossy().into_owned(),
        config_file_present: config_file.exists(),
        snapshot_path: config.snapshot_path().to_string_lossy().into_owned(),
        config: config.clone(),
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  config_file: {}{}",
                response.config_file,
                if response.config_file_present {
                    ""
                } else {
                    " (not present)"
                }
            );
            println!("  indexing:");
            println!("    source_root: {}", config.indexing.source_root.display());
            println!("    artifact_pattern: {}", config.indexing.artifact_pattern);
            println!("  storage:");
            println!("    cache_dir: {}", config.storage.cache_dir.display());
            println!("    snapshot: {}", response.snapshot_path);
            println!("  search:");
            println!(
                "    default_max_results: {}",
                config.search.default_max_results
            );
            println!("    max_results_limit: {}", config.search.max_results_limit);
            println!("    max_query_length: {}", config.search.max_query_length);
            println!("    context_window: {}", config.search.context_window);
            println!("    excerpt_radius: {}", config.search.excerpt_radius);
            println!("    ranking: {}", config.search.ranking);
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}
