//! Search module for transcript queries.
//!
//! Linear scan over the index's segment sequence with three match
//! modes (full-text, regex, exact), pre-match filters, relevance
//! scoring and same-session context windows.

pub mod context;
mod engine;
mod filter;
pub mod matcher;
mod scoring;

pub use context::ContextWindow;
pub use engine::SearchEngine;
pub use matcher::{fold_case, Matcher};
pub use scoring::Scorer;
