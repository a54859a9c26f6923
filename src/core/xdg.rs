//! XDG Base Directory Support
//!
//! Resolves where Lorekeeper reads its configuration and keeps its
//! index snapshot on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for Lorekeeper
///
/// Explicit `LOREKEEPER_*` variables win over the XDG variables, which
/// win over the XDG defaults under the home directory.
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit LOREKEEPER_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.cache)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
            cache_dir: Self::resolve_cache_dir(),
        }
    }

    /// Resolve config directory
    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("LOREKEEPER_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("lorekeeper");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("lorekeeper")
    }

    /// Resolve cache directory
    fn resolve_cache_dir() -> PathBuf {
        if let Ok(dir) = env::var("LOREKEEPER_CACHE_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CACHE_HOME") {
            return PathBuf::from(xdg).join("lorekeeper");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cache")
            .join("lorekeeper")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("LOREKEEPER_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Directory holding the serialized index snapshot
    pub fn index_cache_dir(&self) -> PathBuf {
        self.cache_dir.join("index")
    }

    /// Create the config and cache directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(self.index_cache_dir())?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Cache: {:?}", self.cache_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Index cache: {:?}", self.index_cache_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
