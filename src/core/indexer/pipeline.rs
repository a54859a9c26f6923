//! Index build orchestration.
//!
//! Coordinates the end-to-end build:
//! 1. Try the snapshot (unless a rebuild is forced)
//! 2. Discover session directories
//! 3. Parse each artifact into segments + metadata
//! 4. Assemble the index and persist a new snapshot
//!
//! Every step below the source root is isolated: a broken session or a
//! broken cache is logged and skipped, never fatal.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::artifact::{self, ParsedSession};
use crate::core::indexer::walker::{Discovered, SessionWalker};
use crate::core::storage::SnapshotStore;
use crate::core::types::{BuildReport, SkippedSession, TranscriptIndex};

/// Builds transcript indexes from a source root
pub struct TranscriptIndexer {
    source_root: PathBuf,
    walker: SessionWalker,
    snapshot: SnapshotStore,
}

impl TranscriptIndexer {
    /// Create a new indexer
    ///
    /// # Arguments
    ///
    /// * `source_root` - Directory containing one subdirectory per session
    /// * `artifact_pattern` - Glob for the transcript file inside a session
    /// * `snapshot_path` - Where the index snapshot is cached
    pub fn new(source_root: &Path, artifact_pattern: &str, snapshot_path: PathBuf) -> Result<Self> {
        let walker = SessionWalker::new(artifact_pattern)?;
        // Canonical form so snapshots match regardless of how the root was spelled
        let source_root = fs::canonicalize(source_root).unwrap_or_else(|_| source_root.to_path_buf());

        Ok(Self {
            source_root,
            walker,
            snapshot: SnapshotStore::new(snapshot_path),
        })
    }

    /// Create an indexer from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.indexing.source_root,
            &config.indexing.artifact_pattern,
            config.snapshot_path(),
        )
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn snapshot(&self) -> &SnapshotStore {
        &self.snapshot
    }

    /// Build (or load) an index
    pub fn build(&self, force_rebuild: bool) -> TranscriptIndex {
        self.build_with_report(force_rebuild).0
    }

    /// Build (or load) an index and describe what happened
    pub fn build_with_report(&self, force_rebuild: bool) -> (TranscriptIndex, BuildReport) {
        let start = Instant::now();

        if !force_rebuild && self.snapshot.exists() {
            match self.snapshot.load(&self.source_root) {
                Ok(index) => {
                    tracing::info!(
                        "Loaded index snapshot: {} sessions, {} segments",
                        index.session_count(),
                        index.len()
                    );
                    let report = BuildReport {
                        sessions_indexed: index.session_count(),
                        segments: index.len(),
                        speakers: index.speakers().len(),
                        duration_ms: start.elapsed().as_millis() as u64,
                        from_cache: true,
                        ..BuildReport::default()
                    };
                    return (index, report);
                }
                Err(e) => {
                    tracing::warn!("{}; rebuilding from source", e);
                }
            }
        }

        let (index, mut report) = self.rebuild();

        match self.snapshot.save(&index) {
            Ok(()) => report.cache_written = true,
            Err(e) => tracing::warn!("{}; continuing with in-memory index", e),
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        (index, report)
    }

    /// Discard the snapshot so the next build reads from source
    pub fn invalidate(&self) -> Result<()> {
        self.snapshot.clear()?;
        tracing::info!("Index snapshot cleared: {:?}", self.snapshot.path());
        Ok(())
    }

    /// Session directories present on disk but absent from `index`
    pub fn new_sessions(&self, index: &TranscriptIndex) -> Vec<String> {
        let candidates = match self.walker.candidates(&self.source_root) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Staleness check skipped: {}", e);
                return Vec::new();
            }
        };

        candidates
            .into_iter()
            .map(|c| c.directory)
            .filter(|dir| !index.directories().contains(dir))
            .collect()
    }

    /// Whether `index` no longer reflects the source root.
    ///
    /// Only signals; it never triggers a rebuild.
    pub fn is_stale(&self, index: &TranscriptIndex) -> bool {
        if index.source_root() != self.source_root {
            return true;
        }
        !self.new_sessions(index).is_empty()
    }

    /// Full scan of the source root
    fn rebuild(&self) -> (TranscriptIndex, BuildReport) {
        let mut report = BuildReport::default();

        tracing::info!("Scanning sessions under {:?}", self.source_root);
        let discovered = match self.walker.discover(&self.source_root) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("{}; building an empty index", e);
                return (TranscriptIndex::empty(&self.source_root), report);
            }
        };

        let mut sessions: Vec<ParsedSession> = Vec::new();
        // Consumed by this build but not indexed; kept out of staleness
        let mut unindexed = Vec::new();

        for item in discovered {
            let candidate = match item {
                Discovered::Candidate(c) => c,
                Discovered::Skipped { directory, reason } => {
                    report
                        .sessions_skipped
                        .push(SkippedSession { directory, reason });
                    continue;
                }
            };

            match artifact::load_session(&candidate) {
                Ok(parsed) => {
                    tracing::debug!(
                        "Parsed {} ({} segments)",
                        candidate.directory,
                        parsed.segments.len()
                    );
                    let id = &parsed.metadata.session_id;
                    if let Some(existing) =
                        sessions.iter().position(|s| &s.metadata.session_id == id)
                    {
                        let previous = sessions.remove(existing);
                        tracing::warn!(
                            "Session id '{}' in {} replaces the one from {}",
                            id,
                            candidate.directory,
                            previous.metadata.directory
                        );
                        report.sessions_skipped.push(SkippedSession {
                            directory: previous.metadata.directory.clone(),
                            reason: format!("superseded by {}", candidate.directory),
                        });
                        unindexed.push(previous.metadata.directory);
                    }
                    sessions.push(parsed);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", candidate.directory, e);
                    unindexed.push(candidate.directory.clone());
                    report.sessions_skipped.push(SkippedSession {
                        directory: candidate.directory,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut index = TranscriptIndex::assemble(
            &self.source_root,
            sessions
                .into_iter()
                .map(|s| (s.metadata, s.segments))
                .collect(),
        );
        index.record_directories(unindexed);

        report.sessions_indexed = index.session_count();
        report.segments = index.len();
        report.speakers = index.speakers().len();

        tracing::info!(
            "Index built: {} sessions, {} segments, {} speakers, {} skipped",
            report.sessions_indexed,
            report.segments,
            report.speakers,
            report.sessions_skipped.len()
        );

        (index, report)
    }
}
