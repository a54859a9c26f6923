//! Tests for clear-cache

use crate::common::{campaign_corpus, create_test_services};
use lorekeeper::cli::commands::cache::{execute, ClearCacheArgs};
use lorekeeper::cli::OutputFormat;

/// Test clearing an existing snapshot
#[test]
fn test_clear_cache_removes_snapshot() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());
    services.indexes.get();
    assert!(services.indexes.indexer().snapshot().exists());

    let result = execute(ClearCacheArgs {}, &services, OutputFormat::Human);
    assert!(result.is_ok(), "clear-cache failed: {:?}", result.err());
    assert!(!services.indexes.indexer().snapshot().exists());
    assert!(services.indexes.loaded().is_none());
}

/// Test clearing when nothing is cached
#[test]
fn test_clear_cache_is_idempotent() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    for format in [OutputFormat::Json, OutputFormat::Human] {
        assert!(execute(ClearCacheArgs {}, &services, format).is_ok());
    }
}
