//! Cache command - drop the index snapshot

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the clear-cache command
#[derive(Args, Debug)]
pub struct ClearCacheArgs {}

/// Clear-cache response
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub snapshot_path: String,
    pub removed: bool,
}

/// Execute the clear-cache command
pub fn execute(
    _args: ClearCacheArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = services.indexes.indexer().snapshot();
    let existed = snapshot.exists();

    services.indexes.invalidate()?;

    let response = ClearCacheResponse {
        snapshot_path: snapshot.path().to_string_lossy().into_owned(),
        removed: existed,
    };

    match format {
        OutputFormat::Human => {
            if response.removed {
                println!(
                    "{} {}",
                    colors::success("Removed"),
                    colors::file_path(&response.snapshot_path)
                );
            } else {
                println!(
                    "No snapshot at {}",
                    colors::file_path(&response.snapshot_path)
                );
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}
