//! Session artifact parsing.
//!
//! The transcript pipeline writes one JSON file per session. The
//! contract is loose and versionless: every field is optional and
//! falls back to a default instead of failing the session.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::error::{LorekeeperError, Result};
use crate::core::indexer::walker::SessionCandidate;
use crate::core::types::{Classification, Segment, SessionMetadata};

pub const UNKNOWN_SPEAKER: &str = "Unknown";

#[derive(Debug, Default, Deserialize)]
struct RawArtifact {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    segments: Vec<RawSegment>,
    #[serde(flatten)]
    aggregates: RawAggregates,
    #[serde(default)]
    statistics: Option<RawAggregates>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAggregates {
    #[serde(default)]
    num_speakers: Option<usize>,
    #[serde(default)]
    total_duration: Option<f64>,
    #[serde(default)]
    ic_percentage: Option<f64>,
    #[serde(default)]
    ooc_percentage: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSegment {
    #[serde(default)]
    start: Option<f64>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    speaker: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    classification: Option<String>,
}

/// A parsed session, ready to be appended to an index
#[derive(Debug, Clone)]
pub struct ParsedSession {
    pub metadata: SessionMetadata,
    pub segments: Vec<Segment>,
}

/// Read and parse the artifact of one session candidate
///
/// # Errors
///
/// Returns `ArtifactParse` if the file cannot be read or is not a
/// JSON object of the expected shape.
pub fn load_session(candidate: &SessionCandidate) -> Result<ParsedSession> {
    let contents =
        fs::read_to_string(&candidate.artifact).map_err(|e| parse_error(&candidate.artifact, e))?;
    parse_session(candidate, &contents)
}

/// Parse artifact contents for a candidate (no I/O)
pub fn parse_session(candidate: &SessionCandidate, contents: &str) -> Result<ParsedSession> {
    let raw: RawArtifact =
        serde_json::from_str(contents).map_err(|e| parse_error(&candidate.artifact, e))?;

    let session_id = raw
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| candidate.name.session_id.clone());
    let session_date = candidate.name.session_date.clone();
    let source_ref = candidate.artifact.to_string_lossy().into_owned();

    let segments: Vec<Segment> = raw
        .segments
        .into_iter()
        .enumerate()
        .map(|(position, seg)| {
            let timestamp = seg.start.unwrap_or(0.0);
            Segment {
                session_id: session_id.clone(),
                timestamp,
                timestamp_str: seg
                    .timestamp
                    .unwrap_or_else(|| format_timestamp(timestamp)),
                speaker: seg
                    .speaker
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
                text: seg.text.unwrap_or_default(),
                classification: seg
                    .classification
                    .as_deref()
                    .map(Classification::from_label)
                    .unwrap_or_default(),
                position,
                session_date: session_date.clone(),
                source_ref: source_ref.clone(),
            }
        })
        .collect();

    // Nested statistics win over top-level aggregates
    let nested = raw.statistics.unwrap_or_default();
    let top = raw.aggregates;

    let metadata = SessionMetadata {
        session_id,
        session_date,
        speaker_count: nested.num_speakers.or(top.num_speakers).unwrap_or(0),
        total_duration: nested.total_duration.or(top.total_duration).unwrap_or(0.0),
        ic_percentage: nested.ic_percentage.or(top.ic_percentage).unwrap_or(0.0),
        ooc_percentage: nested.ooc_percentage.or(top.ooc_percentage).unwrap_or(0.0),
        directory: candidate.directory.clone(),
        artifact_path: candidate.artifact.clone(),
        segment_count: segments.len(),
    };

    Ok(ParsedSession { metadata, segments })
}

/// `HH:MM:SS` for artifacts that omit the display timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

fn parse_error(path: &Path, e: impl std::fmt::Display) -> LorekeeperError {
    LorekeeperError::ArtifactParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
