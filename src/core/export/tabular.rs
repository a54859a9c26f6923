//! CSV export: one row per result with a fixed column set.
//!
//! Context lists are stored in a single cell each, one line per entry.

use crate::core::error::{LorekeeperError, Result};
use crate::core::types::SearchResult;

pub const CSV_HEADER: [&str; 11] = [
    "session_id",
    "session_date",
    "timestamp",
    "speaker",
    "classification",
    "text",
    "matched_excerpt",
    "relevance_score",
    "timestamp_str",
    "context_before",
    "context_after",
];

pub(super) fn render(results: &[SearchResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for result in results {
        let seg = &result.segment;
        let timestamp = seg.timestamp.to_string();
        let score = result.relevance_score.to_string();
        let before = result.context_before.join("\n");
        let after = result.context_after.join("\n");
        writer.write_record([
            seg.session_id.as_str(),
            seg.session_date.as_str(),
            timestamp.as_str(),
            seg.speaker.as_str(),
            seg.classification.as_str(),
            seg.text.as_str(),
            result.matched_excerpt.as_str(),
            score.as_str(),
            seg.timestamp_str.as_str(),
            before.as_str(),
            after.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LorekeeperError::ExportFailed(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| LorekeeperError::ExportFailed(format!("CSV output is not UTF-8: {e}")))
}
