//! Index command - build or load the transcript index

use crate::cli::output::{
    colors, format_bytes, format_duration, format_relative_time, print_json,
};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::SkippedSession;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Ignore the snapshot and rebuild from the session artifacts
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Report snapshot freshness without building
    #[arg(long, conflicts_with = "force")]
    pub status: bool,
}

/// Build result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub source_root: String,
    pub sessions_indexed: usize,
    pub segments: usize,
    pub speakers: usize,
    pub skipped: Vec<SkippedSession>,
    pub from_cache: bool,
    pub cache_written: bool,
    pub duration_secs: f64,
}

/// Snapshot status response
#[derive(Debug, Serialize)]
pub struct IndexStatusResponse {
    pub source_root: String,
    pub snapshot_path: String,
    pub snapshot_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<String>,
    pub sessions: usize,
    pub segments: usize,
    pub stale: bool,
    pub new_sessions: Vec<String>,
}

/// Execute the index command
pub fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.status {
        return execute_status(services, format);
    }

    let indexer = services.indexes.indexer();
    if format == OutputFormat::Human {
        eprintln!(
            "Indexing sessions under {}...",
            colors::file_path(&indexer.source_root().display().to_string())
        );
    }

    let (_, report) = services.indexes.rebuild(args.force);

    let response = IndexResponse {
        source_root: indexer.source_root().to_string_lossy().into_owned(),
        sessions_indexed: report.sessions_indexed,
        segments: report.segments,
        speakers: report.speakers,
        skipped: report.sessions_skipped,
        from_cache: report.from_cache,
        cache_written: report.cache_written,
        duration_secs: report.duration_ms as f64 / 1000.0,
    };

    match format {
        OutputFormat::Human => {
            let verb = if response.from_cache {
                "Loaded"
            } else {
                "Indexed"
            };
            println!(
                "{} {} sessions ({} segments, {} speakers) in {}",
                colors::success(verb),
                colors::number(&response.sessions_indexed.to_string()),
                colors::number(&response.segments.to_string()),
                colors::number(&response.speakers.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.from_cache {
                println!(
                    "{}",
                    colors::dim("From snapshot; use --force to rebuild from source")
                );
            } else if !response.cache_written {
                println!("{}", colors::warning("Snapshot could not be written"));
            }
            if !response.skipped.is_empty() {
                println!(
                    "{} ({}):",
                    colors::warning("Skipped"),
                    colors::number(&response.skipped.len().to_string())
                );
                for skipped in &response.skipped {
                    println!(
                        "  {}  {}",
                        colors::file_path(&skipped.directory),
                        colors::dim(&skipped.reason)
                    );
                }
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}

fn execute_status(
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let indexer = services.indexes.indexer();
    let snapshot = indexer.snapshot();

    // Only look at what is already built; never trigger a build here
    let index = match services.indexes.loaded() {
        Some(index) => Some(index),
        None => snapshot.load(indexer.source_root()).ok().map(Arc::new),
    };

    let new_sessions = index
        .as_ref()
        .map(|i| indexer.new_sessions(i))
        .unwrap_or_default();

    let response = IndexStatusResponse {
        source_root: indexer.source_root().to_string_lossy().into_owned(),
        snapshot_path: snapshot.path().to_string_lossy().into_owned(),
        snapshot_present: snapshot.exists(),
        snapshot_bytes: fs::metadata(snapshot.path()).ok().map(|m| m.len()),
        built_at: index.as_ref().map(|i| i.built_at().to_rfc3339()),
        sessions: index.as_ref().map_or(0, |i| i.session_count()),
        segments: index.as_ref().map_or(0, |i| i.len()),
        stale: index.as_ref().map_or(true, |i| indexer.is_stale(i)),
        new_sessions,
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Index status:"));
            println!(
                "  source:    {}",
                colors::file_path(&response.source_root)
            );
            println!(
                "  snapshot:  {}",
                colors::file_path(&response.snapshot_path)
            );
            match (&index, response.snapshot_bytes) {
                (Some(index), bytes) => {
                    println!(
                        "  contents:  {} sessions, {} segments{}",
                        colors::number(&response.sessions.to_string()),
                        colors::number(&response.segments.to_string()),
                        bytes
                            .map(|b| format!(" ({})", format_bytes(b)))
                            .unwrap_or_default()
                    );
                    println!(
                        "  built:     {}",
                        colors::dim(&format_relative_time(&index.built_at()))
                    );
                }
                (None, _) => {
                    println!("  contents:  {}", colors::dim("no usable snapshot"));
                }
            }
            if response.stale {
                println!(
                    "  state:     {} (run 'lorekeeper index --force')",
                    colors::warning("stale")
                );
                for dir in &response.new_sessions {
                    println!("    new: {}", colors::session_id(dir));
                }
            } else {
                println!("  state:     {}", colors::success("up to date"));
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}
