//! Core data types for Lorekeeper.
//!
//! This module defines the searchable units (segments), per-session
//! metadata, the immutable transcript index, and the request/response
//! shapes of the search engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::error::QueryError;

/// In-character / out-of-character tag of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "IC")]
    InCharacter,
    #[serde(rename = "OOC")]
    OutOfCharacter,
    #[default]
    Unknown,
}

impl Classification {
    /// Canonical label used in artifacts and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::InCharacter => "IC",
            Classification::OutOfCharacter => "OOC",
            Classification::Unknown => "Unknown",
        }
    }

    /// Lenient mapping used when reading session artifacts.
    ///
    /// Anything that is not recognisably IC or OOC becomes `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "ic" | "in-character" | "in_character" | "character" => Classification::InCharacter,
            "ooc" | "out-of-character" | "out_of_character" => Classification::OutOfCharacter,
            _ => Classification::Unknown,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Classification::from_label(s) {
            Classification::Unknown if !s.trim().eq_ignore_ascii_case("unknown") => Err(format!(
                "unknown classification '{s}' (expected IC, OOC or Unknown)"
            )),
            classification => Ok(classification),
        }
    }
}

/// One speaker-attributed, timestamped line of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub session_id: String,

    /// Offset in seconds from session start
    pub timestamp: f64,

    /// Display form of the timestamp, as written in the artifact
    pub timestamp_str: String,

    pub speaker: String,

    pub text: String,

    pub classification: Classification,

    /// 0-based order within its own session
    pub position: usize,

    /// Sortable `YYYY-MM-DD` date of the session
    pub session_date: String,

    /// Artifact this segment was read from
    pub source_ref: String,
}

impl Segment {
    /// `speaker: text`, the form used for context lines
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}

/// Session-level metadata (one record per session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub session_id: String,
    pub session_date: String,
    pub speaker_count: usize,
    pub total_duration: f64,
    pub ic_percentage: f64,
    pub ooc_percentage: f64,

    /// Name of the session directory under the source root
    pub directory: String,

    pub artifact_path: PathBuf,

    pub segment_count: usize,
}

/// The searchable corpus.
///
/// Built by the indexer in one pass and never mutated afterwards; a
/// rebuild produces a whole new value. Segments of one session are
/// stored contiguously, in session order, so `(session_id, position)`
/// resolves to a sequence offset without scanning.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptIndex {
    segments: Vec<Segment>,
    sessions: BTreeMap<String, SessionMetadata>,
    speakers: BTreeSet<String>,
    built_at: DateTime<Utc>,
    source_root: PathBuf,
    /// Session directories consumed by the build that produced this index
    directories: BTreeSet<String>,
    #[serde(skip)]
    spans: HashMap<String, Range<usize>>,
}

/// Serialized fields of `TranscriptIndex`; the span table is derived
#[derive(Deserialize)]
struct IndexFields {
    segments: Vec<Segment>,
    sessions: BTreeMap<String, SessionMetadata>,
    speakers: BTreeSet<String>,
    built_at: DateTime<Utc>,
    source_root: PathBuf,
    directories: BTreeSet<String>,
}

impl<'de> Deserialize<'de> for TranscriptIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = IndexFields::deserialize(deserializer)?;
        let mut index = Self {
            segments: fields.segments,
            sessions: fields.sessions,
            speakers: fields.speakers,
            built_at: fields.built_at,
            source_root: fields.source_root,
            directories: fields.directories,
            spans: HashMap::new(),
        };
        index.restore_spans();
        Ok(index)
    }
}

impl TranscriptIndex {
    /// Assemble an index from sessions in traversal order.
    ///
    /// Callers must pass each session id at most once.
    pub(crate) fn assemble(
        source_root: &Path,
        sessions: Vec<(SessionMetadata, Vec<Segment>)>,
    ) -> Self {
        let mut segments = Vec::new();
        let mut metadata = BTreeMap::new();

        for (meta, session_segments) in sessions {
            segments.extend(session_segments);
            metadata.insert(meta.session_id.clone(), meta);
        }

        let speakers = segments.iter().map(|s| s.speaker.clone()).collect();
        let directories = metadata.values().map(|m| m.directory.clone()).collect();

        let mut index = Self {
            segments,
            sessions: metadata,
            speakers,
            built_at: Utc::now(),
            source_root: source_root.to_path_buf(),
            directories,
            spans: HashMap::new(),
        };
        index.restore_spans();
        index
    }

    /// Index with no sessions (unreadable or empty source root)
    pub(crate) fn empty(source_root: &Path) -> Self {
        Self::assemble(source_root, Vec::new())
    }

    /// Remember directories the build consumed without indexing them
    /// (superseded or unparseable sessions)
    pub(crate) fn record_directories(&mut self, directories: impl IntoIterator<Item = String>) {
        self.directories.extend(directories);
    }

    /// Recompute the session span table (not part of the snapshot)
    fn restore_spans(&mut self) {
        self.spans.clear();
        let mut start = 0;
        while start < self.segments.len() {
            let session_id = &self.segments[start].session_id;
            let mut end = start + 1;
            while end < self.segments.len() && &self.segments[end].session_id == session_id {
                end += 1;
            }
            self.spans.insert(session_id.clone(), start..end);
            start = end;
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn sessions(&self) -> &BTreeMap<String, SessionMetadata> {
        &self.sessions
    }

    pub fn session(&self, session_id: &str) -> Option<&SessionMetadata> {
        self.sessions.get(session_id)
    }

    pub fn speakers(&self) -> &BTreeSet<String> {
        &self.speakers
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Session directory names captured at build time
    pub fn directories(&self) -> &BTreeSet<String> {
        &self.directories
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Sequence offset of the segment at `position` within `session_id`
    pub fn locate(&self, session_id: &str, position: usize) -> Option<usize> {
        let span = self.spans.get(session_id)?;
        let offset = span.start.checked_add(position)?;
        (offset < span.end).then_some(offset)
    }

    /// All segments of one session, in session order
    pub fn session_segments(&self, session_id: &str) -> &[Segment] {
        match self.spans.get(session_id) {
            Some(span) => &self.segments[span.clone()],
            None => &[],
        }
    }
}

/// A session directory that did not make it into the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSession {
    pub directory: String,
    pub reason: String,
}

/// Statistics from a build (or cache load)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildReport {
    pub sessions_indexed: usize,
    pub sessions_skipped: Vec<SkippedSession>,
    pub segments: usize,
    pub speakers: usize,
    pub duration_ms: u64,
    pub from_cache: bool,
    pub cache_written: bool,
}

/// How a query string is matched against segment text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Case-insensitive substring containment
    #[default]
    FullText,
    /// Case-insensitive regular expression
    Regex,
    /// Literal phrase, metacharacters escaped
    Exact,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::FullText => "full-text",
            SearchMode::Regex => "regex",
            SearchMode::Exact => "exact",
        })
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-text" | "full_text" | "fulltext" | "text" => Ok(SearchMode::FullText),
            "regex" | "pattern" => Ok(SearchMode::Regex),
            "exact" | "phrase" => Ok(SearchMode::Exact),
            other => Err(format!(
                "unknown search mode '{other}' (expected full-text, regex or exact)"
            )),
        }
    }
}

/// How `max_results` interacts with ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingStrategy {
    /// Score every match, then keep the best `max_results`
    #[default]
    Global,
    /// Stop scanning after `max_results` matches, then rank those
    ScanOrder,
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RankingStrategy::Global => "global",
            RankingStrategy::ScanOrder => "scan-order",
        })
    }
}

impl FromStr for RankingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(RankingStrategy::Global),
            "scan-order" | "scan_order" | "scan" => Ok(RankingStrategy::ScanOrder),
            other => Err(format!(
                "unknown ranking strategy '{other}' (expected global or scan-order)"
            )),
        }
    }
}

/// Optional restrictions applied before text matching.
///
/// Empty sets and `None` bounds mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub speakers: BTreeSet<String>,
    #[serde(default)]
    pub classification: Option<Classification>,
    #[serde(default)]
    pub session_ids: BTreeSet<String>,
    #[serde(default)]
    pub min_seconds: Option<f64>,
    #[serde(default)]
    pub max_seconds: Option<f64>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

/// A search over one index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default)]
    pub filters: SearchFilters,
    /// Falls back to the configured default when absent
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub include_context: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            query: query.into(),
            mode,
            filters: SearchFilters::default(),
            max_results: None,
            include_context: false,
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_context(mut self, include_context: bool) -> Self {
        self.include_context = include_context;
        self
    }
}

/// One matching segment with its ranking data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub segment: Segment,

    pub matched_excerpt: String,

    /// Relevance score (higher = more relevant)
    pub relevance_score: f64,

    /// Up to the context window of preceding lines, same session only
    #[serde(default)]
    pub context_before: Vec<String>,

    #[serde(default)]
    pub context_after: Vec<String>,
}

/// Outcome of one search call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: SearchMode,
    pub results: Vec<SearchResult>,
    pub count: usize,
    pub duration_ms: u64,

    /// Set when the query itself was rejected (never for "no matches")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<QueryError>,
}

impl SearchResponse {
    pub(crate) fn empty(request: &SearchRequest) -> Self {
        Self {
            query: request.query.clone(),
            mode: request.mode,
            results: Vec::new(),
            count: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub(crate) fn rejected(request: &SearchRequest, error: QueryError) -> Self {
        Self {
            error: Some(error),
            ..Self::empty(request)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
