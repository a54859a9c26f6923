//! Index snapshot persistence.
//!
//! The snapshot is a private, versioned JSON envelope around a
//! `TranscriptIndex`. Any load problem (missing file, corrupt JSON,
//! another format version, another source root) is reported as
//! `CacheLoad` so the indexer can fall back to a full rebuild.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{LorekeeperError, Result};
use crate::core::types::TranscriptIndex;

/// Bump whenever the serialized shape of `TranscriptIndex` changes
pub const SNAPSHOT_VERSION: u32 = 2;

#[derive(Debug, Deserialize)]
struct SnapshotEnvelope {
    format_version: u32,
    crate_version: String,
    index: TranscriptIndex,
}

/// Write-side envelope borrowing the index
#[derive(Serialize)]
struct SnapshotEnvelopeRef<'a> {
    format_version: u32,
    crate_version: &'a str,
    index: &'a TranscriptIndex,
}

/// Reads and writes the index snapshot at a fixed path
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load a snapshot built for `source_root`
    pub fn load(&self, source_root: &Path) -> Result<TranscriptIndex> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            LorekeeperError::CacheLoad(format!("Cannot read {:?}: {e}", self.path))
        })?;

        let envelope: SnapshotEnvelope = serde_json::from_str(&contents)
            .map_err(|e| LorekeeperError::CacheLoad(format!("Corrupt snapshot: {e}")))?;

        if envelope.format_version != SNAPSHOT_VERSION {
            return Err(LorekeeperError::CacheLoad(format!(
                "Snapshot format v{} (written by {}), expected v{}",
                envelope.format_version, envelope.crate_version, SNAPSHOT_VERSION
            )));
        }

        if envelope.index.source_root() != source_root {
            return Err(LorekeeperError::CacheLoad(format!(
                "Snapshot was built for {:?}, not {:?}",
                envelope.index.source_root(),
                source_root
            )));
        }

        Ok(envelope.index)
    }

    /// Persist a snapshot, replacing any previous one.
    ///
    /// Written to a sibling temp file first so a failed write never
    /// leaves a truncated snapshot behind.
    pub fn save(&self, index: &TranscriptIndex) -> Result<()> {
        let envelope = SnapshotEnvelopeRef {
            format_version: SNAPSHOT_VERSION,
            crate_version: env!("CARGO_PKG_VERSION"),
            index,
        };

        let json = serde_json::to_string(&envelope)
            .map_err(|e| LorekeeperError::CacheWrite(format!("Cannot serialize index: {e}")))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LorekeeperError::CacheWrite(format!("Cannot create {parent:?}: {e}"))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| LorekeeperError::CacheWrite(format!("Cannot write {tmp:?}: {e}")))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            LorekeeperError::CacheWrite(format!("Cannot replace {:?}: {e}", self.path))
        })?;

        Ok(())
    }

    /// Remove the snapshot; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
