//! Result export.
//!
//! Pure serialization of search results into one of four formats.
//! Nothing here ranks, filters or rescores: results are written in the
//! order they are given.
//!
//! Every format carries the full record: session id and date, numeric
//! and display timestamps, speaker, classification, full text, matched
//! excerpt, relevance score and both context lists.

mod document;
mod json;
mod tabular;
mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::{LorekeeperError, Result};
use crate::core::types::SearchResult;

pub use tabular::CSV_HEADER;

/// Export target format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Array of result records
    Json,
    /// Flat rows with a fixed column set
    Csv,
    /// Plain-text block report
    Text,
    /// Markdown report
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Text,
        ExportFormat::Document,
    ];

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
            ExportFormat::Document => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "text",
            ExportFormat::Document => "document",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            "document" | "doc" | "md" | "markdown" => Ok(ExportFormat::Document),
            other => Err(format!(
                "unknown export format '{other}' (expected json, csv, text or document)"
            )),
        }
    }
}

/// Writes search results to files
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultExporter;

impl ResultExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render results in `format` without touching the filesystem
    pub fn render(&self, results: &[SearchResult], format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => json::render(results),
            ExportFormat::Csv => tabular::render(results),
            ExportFormat::Text => Ok(text::render(results)),
            ExportFormat::Document => Ok(document::render(results)),
        }
    }

    /// Render and write results to `destination`
    ///
    /// # Errors
    ///
    /// Returns `ExportFailed` if rendering or writing fails.
    pub fn try_export(
        &self,
        results: &[SearchResult],
        format: ExportFormat,
        destination: &Path,
    ) -> Result<()> {
        let rendered = self
            .render(results, format)
            .map_err(|e| LorekeeperError::ExportFailed(e.to_string()))?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LorekeeperError::ExportFailed(format!("Cannot create {parent:?}: {e}"))
            })?;
        }

        fs::write(destination, rendered).map_err(|e| {
            LorekeeperError::ExportFailed(format!("Cannot write {destination:?}: {e}"))
        })?;

        tracing::info!(
            "Exported {} results as {} to {:?}",
            results.len(),
            format,
            destination
        );
        Ok(())
    }

    /// Render and write results; failures are logged and reported as `false`
    pub fn export(&self, results: &[SearchResult], format: ExportFormat, destination: &Path) -> bool {
        match self.try_export(results, format, destination) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }
}
