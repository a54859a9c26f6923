//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod cache;
pub mod completions;
pub mod config;
pub mod index;
pub mod search;
pub mod sessions;

// Re-export argument types for use in mod.rs
pub use cache::ClearCacheArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use index::IndexArgs;
pub use search::SearchArgs;
