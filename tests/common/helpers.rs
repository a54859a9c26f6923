// Test helper functions

use lorekeeper::core::config::Config;
use lorekeeper::core::services::Services;
use lorekeeper::{SearchResult, TranscriptIndexer};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Services over `source_root` with the snapshot in a fresh temp dir
#[allow(dead_code)] // Used in CLI tests
pub fn create_test_services(source_root: &Path) -> (Arc<Services>, TempDir) {
    let cache = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.indexing.source_root = source_root.to_path_buf();
    config.storage.cache_dir = cache.path().to_path_buf();

    let services = Services::new(config).expect("Failed to create services");
    (Arc::new(services), cache)
}

/// Indexer over `source_root` with the snapshot in `cache`
#[allow(dead_code)] // Used in core tests
pub fn indexer_for(source_root: &Path, cache: &TempDir) -> TranscriptIndexer {
    TranscriptIndexer::new(
        source_root,
        "*_data.json",
        cache.path().join("transcript-index.json"),
    )
    .expect("Failed to create indexer")
}

/// The fields an export must carry unchanged, for comparisons
#[allow(dead_code)] // Used in export tests
pub fn result_fields(result: &SearchResult) -> (String, String, String, f64) {
    (
        result.segment.speaker.clone(),
        result.segment.text.clone(),
        result.segment.classification.to_string(),
        result.relevance_score,
    )
}
