//! Lorekeeper - searchable index over tabletop session transcripts
//!
//! Builds an in-memory index from per-session transcript artifacts
//! (one `DATE_TIME_ID` directory per recorded session) and answers
//! full-text, regex and exact-phrase queries with filters, relevance
//! ranking and same-session context. Results export to JSON, CSV,
//! plain text or a Markdown report.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (session discovery, artifact parsing, snapshot fallback)
//!   - storage (index snapshot)
//!   - search (filters, modes, scoring, context)
//!   - export (result writers)
//!   - services (unified service container)
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Example
//!
//! ```no_run
//! use lorekeeper::{SearchEngine, SearchMode, SearchRequest, TranscriptIndexer};
//! use lorekeeper::core::config::SearchConfig;
//! use std::path::{Path, PathBuf};
//!
//! let indexer = TranscriptIndexer::new(
//!     Path::new("./output"),
//!     "*_data.json",
//!     PathBuf::from("/tmp/lorekeeper/transcript-index.json"),
//! )?;
//! let index = indexer.build(false);
//!
//! let engine = SearchEngine::new(SearchConfig::default());
//! let response = engine.search(&index, &SearchRequest::new("dragon", SearchMode::FullText));
//! for result in &response.results {
//!     println!("{}: {}", result.segment.speaker, result.matched_excerpt);
//! }
//! # Ok::<(), lorekeeper::LorekeeperError>(())
//! ```

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{LorekeeperError, QueryError, Result};
pub use core::export::{ExportFormat, ResultExporter};
pub use core::indexer::TranscriptIndexer;
pub use core::search::SearchEngine;
pub use core::services::{IndexHandle, Services};
pub use core::types::*;
