//! Session indexing module.
//!
//! Turns a directory of per-session transcript artifacts into a
//! `TranscriptIndex`. Key features:
//!
//! - `DATE_TIME_ID` session directory discovery
//! - Loose, default-filling artifact parsing
//! - Per-session failure isolation
//! - Snapshot caching with fallback to a full rebuild

pub mod artifact;
pub mod pipeline;
pub mod walker;

pub use artifact::{load_session, ParsedSession};
pub use pipeline::TranscriptIndexer;
pub use walker::{parse_session_dir_name, SessionWalker};
