//! Core domain logic (front-end agnostic)
//!
//! This module contains all indexing, search and export logic. The CLI
//! is a thin adapter on top of it.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Segments, session metadata, the index, search shapes
//! - **xdg**: XDG directory handling
//! - **indexer**: Session discovery, artifact parsing, build orchestration
//! - **storage**: Index snapshot cache
//! - **search**: Filters, match modes, scoring, context windows
//! - **export**: JSON / CSV / text / Markdown result writers
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod export;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types for convenience
pub use config::Config;
pub use error::{LorekeeperError, QueryError, Result};
pub use services::{IndexHandle, Services};
