//! Session directory discovery.
//!
//! Looks at the immediate subdirectories of a source root, recovers
//! the session date and id from the `DATE_TIME_ID` naming convention
//! and locates the transcript artifact inside each one. Anything that
//! does not fit is reported as skipped rather than failing the walk.

use chrono::{NaiveDate, NaiveTime};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{LorekeeperError, Result};

const DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 2] = ["%H%M%S", "%H-%M-%S"];

/// Parts recovered from a session directory name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDirName {
    /// Normalised to `YYYY-MM-DD`
    pub session_date: String,
    pub session_id: String,
}

/// Parse `DATE_TIME_ID` into a session date and id.
///
/// The id is everything after the second underscore and may contain
/// further underscores. Returns `None` for names that do not conform.
pub fn parse_session_dir_name(name: &str) -> Option<SessionDirName> {
    let mut parts = name.splitn(3, '_');
    let date = parts.next()?;
    let time = parts.next()?;
    let id = parts.next()?;

    if id.trim().is_empty() {
        return None;
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())?;

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())?;

    Some(SessionDirName {
        session_date: date.format("%Y-%m-%d").to_string(),
        session_id: id.to_string(),
    })
}

/// A directory that looks like a session and has an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCandidate {
    pub directory: String,
    pub path: PathBuf,
    pub name: SessionDirName,
    pub artifact: PathBuf,
}

/// Result of inspecting one subdirectory of the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    Candidate(SessionCandidate),
    Skipped { directory: String, reason: String },
}

/// Walks a source root for session directories
pub struct SessionWalker {
    /// Artifact file name pattern (e.g. "*_data.json")
    artifact_pattern: Pattern,
}

impl SessionWalker {
    /// Create a new session walker
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `artifact_pattern` is not a
    /// valid glob.
    pub fn new(artifact_pattern: &str) -> Result<Self> {
        let artifact_pattern = Pattern::new(artifact_pattern).map_err(|e| {
            LorekeeperError::ConfigError(format!(
                "Invalid artifact pattern '{artifact_pattern}': {e}"
            ))
        })?;

        Ok(Self { artifact_pattern })
    }

    /// Inspect every visible subdirectory of `root`, in name order
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `root` is missing or not a readable
    /// directory. Problems with individual entries are logged and
    /// reported as skipped.
    pub fn discover(&self, root: &Path) -> Result<Vec<Discovered>> {
        if !root.is_dir() {
            return Err(LorekeeperError::InvalidPath(format!(
                "Source root {root:?} is not a directory"
            )));
        }
        // Surface permission problems on the root itself
        std::fs::read_dir(root).map_err(|e| {
            LorekeeperError::InvalidPath(format!("Cannot read source root {root:?}: {e}"))
        })?;

        let mut discovered = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            discovered.push(self.inspect(&entry));
        }

        Ok(discovered)
    }

    /// Only the candidates, for staleness checks
    pub fn candidates(&self, root: &Path) -> Result<Vec<SessionCandidate>> {
        Ok(self
            .discover(root)?
            .into_iter()
            .filter_map(|d| match d {
                Discovered::Candidate(c) => Some(c),
                Discovered::Skipped { .. } => None,
            })
            .collect())
    }

    fn inspect(&self, entry: &DirEntry) -> Discovered {
        let directory = entry.file_name().to_string_lossy().into_owned();

        let Some(name) = parse_session_dir_name(&directory) else {
            tracing::debug!("Skipping non-session directory: {}", directory);
            return Discovered::Skipped {
                directory,
                reason: "name does not follow DATE_TIME_ID".to_string(),
            };
        };

        let artifacts = self.find_artifacts(entry.path());
        let artifact = match artifacts.as_slice() {
            [] => {
                tracing::warn!(
                    "No artifact matching '{}' in {:?}, skipping",
                    self.artifact_pattern,
                    entry.path()
                );
                return Discovered::Skipped {
                    directory,
                    reason: format!("no file matching '{}'", self.artifact_pattern),
                };
            }
            [only] => only.clone(),
            [first, rest @ ..] => {
                tracing::warn!(
                    "{} artifacts in {:?}, using {:?}",
                    rest.len() + 1,
                    entry.path(),
                    first.file_name().unwrap_or_default()
                );
                first.clone()
            }
        };

        Discovered::Candidate(SessionCandidate {
            directory,
            path: entry.path().to_path_buf(),
            name,
            artifact,
        })
    }

    /// Files directly inside `dir` matching the artifact pattern, sorted
    fn find_artifacts(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::warn!("Walk error: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| self.artifact_pattern.matches(name))
                    .unwrap_or(false)
            })
            .map(|e| e.into_path())
            .collect()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
