//! Storage layer for the index snapshot.
//!
//! # Cache Structure
//!
//! ```text
//! {cache_dir}/
//! └── index/
//!     └── transcript-index.json   # versioned snapshot of the last full build
//! ```

mod snapshot;

pub use snapshot::{SnapshotStore, SNAPSHOT_VERSION};
