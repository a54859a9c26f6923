//! Configuration management for Lorekeeper.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{LorekeeperError, Result};
use crate::core::types::RankingStrategy;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Directory holding one subdirectory per session
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Glob matched against file names inside a session directory
    #[serde(default = "default_artifact_pattern")]
    pub artifact_pattern: String,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Cache root; the snapshot lives under `index/`
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Result cap used when a request does not set one
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Upper bound on any request's result cap
    #[serde(default = "default_max_results_limit")]
    pub max_results_limit: usize,

    /// Maximum query string length (characters)
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Neighbouring segments shown on each side of a match
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Characters of text kept on each side of the first match
    #[serde(default = "default_excerpt_radius")]
    pub excerpt_radius: usize,

    #[serde(default)]
    pub ranking: RankingStrategy,
}

// Default value functions
fn default_source_root() -> PathBuf {
    PathBuf::from("./output")
}

fn default_artifact_pattern() -> String {
    "*_data.json".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./.lorekeeper-cache")
}

fn default_max_results() -> usize {
    100
}

fn default_max_results_limit() -> usize {
    1000
}

fn default_max_query_length() -> usize {
    500
}

fn default_context_window() -> usize {
    2
}

fn default_excerpt_radius() -> usize {
    50
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            artifact_pattern: default_artifact_pattern(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: default_max_results(),
            max_results_limit: default_max_results_limit(),
            max_query_length: default_max_query_length(),
            context_window: default_context_window(),
            excerpt_radius: default_excerpt_radius(),
            ranking: RankingStrategy::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LorekeeperError::ConfigError(format!("Failed to read config file: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. LOREKEEPER_CONFIG env var
    /// 2. XDG config file (~/.config/lorekeeper/config.toml)
    /// 3. ./lorekeeper.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("LOREKEEPER_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("lorekeeper.toml").exists() {
                Self::from_file("lorekeeper.toml")?
            } else {
                Self::default()
            }
        };

        // The snapshot belongs in the XDG cache unless a file said otherwise
        if config.storage.cache_dir == default_cache_dir() {
            config.storage.cache_dir = xdg.cache_dir.clone();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(root) = env::var("LOREKEEPER_SOURCE_ROOT") {
            self.indexing.source_root = PathBuf::from(root);
        }
        if let Ok(pattern) = env::var("LOREKEEPER_ARTIFACT_PATTERN") {
            self.indexing.artifact_pattern = pattern;
        }

        // Storage configuration
        if let Ok(cache_dir) = env::var("LOREKEEPER_CACHE_DIR") {
            self.storage.cache_dir = PathBuf::from(cache_dir);
        }

        // Search configuration
        if let Ok(max_results) = env::var("LOREKEEPER_MAX_RESULTS") {
            if let Ok(n) = max_results.parse() {
                self.search.default_max_results = n;
            }
        }
        if let Ok(max_query_len) = env::var("LOREKEEPER_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }
        if let Ok(window) = env::var("LOREKEEPER_CONTEXT_WINDOW") {
            if let Ok(w) = window.parse() {
                self.search.context_window = w;
            }
        }
        if let Ok(ranking) = env::var("LOREKEEPER_RANKING") {
            match ranking.parse() {
                Ok(r) => self.search.ranking = r,
                Err(e) => tracing::warn!("Ignoring LOREKEEPER_RANKING: {}", e),
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.artifact_pattern.trim().is_empty() {
            return Err(LorekeeperError::ConfigError(
                "Artifact pattern must not be empty".to_string(),
            ));
        }

        if let Err(e) = glob::Pattern::new(&self.indexing.artifact_pattern) {
            return Err(LorekeeperError::ConfigError(format!(
                "Invalid artifact pattern '{}': {e}",
                self.indexing.artifact_pattern
            )));
        }

        if self.search.default_max_results == 0 {
            return Err(LorekeeperError::ConfigError(
                "Default max results must be non-zero".to_string(),
            ));
        }

        if self.search.default_max_results > self.search.max_results_limit {
            return Err(LorekeeperError::ConfigError(
                "Default max results cannot exceed the max results limit".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(LorekeeperError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Location of the index snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.storage.cache_dir.join("index").join("transcript-index.json")
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Source root: {:?}", self.indexing.source_root);
        tracing::info!("  Artifact pattern: {}", self.indexing.artifact_pattern);
        tracing::info!("  Cache dir: {:?}", self.storage.cache_dir);
        tracing::info!("  Default max results: {}", self.search.default_max_results);
        tracing::info!("  Max results limit: {}", self.search.max_results_limit);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Context window: {}", self.search.context_window);
        tracing::info!("  Ranking: {:?}", self.search.ranking);
    }
}
