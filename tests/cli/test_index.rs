//! Tests for the index CLI command
//!
//! - Building from source and from the snapshot
//! - --force and --status
//! - Output format variations

use crate::common::{campaign_corpus, create_test_services};
use lorekeeper::cli::commands::index::{execute, IndexArgs};
use lorekeeper::cli::OutputFormat;

/// Test a first build in human format
#[test]
fn test_index_builds_human() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let args = IndexArgs {
        force: false,
        status: false,
    };
    let result = execute(args, &services, OutputFormat::Human);
    assert!(result.is_ok(), "Index should succeed: {:?}", result.err());

    let index = services.indexes.loaded().expect("index should be in memory");
    assert_eq!(index.session_count(), 2);
    assert!(services.indexes.indexer().snapshot().exists());
}

/// Test forced rebuild in JSON format
#[test]
fn test_index_force_json() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    for force in [false, true] {
        let args = IndexArgs {
            force,
            status: false,
        };
        let result = execute(args, &services, OutputFormat::Json);
        assert!(result.is_ok(), "Index should succeed: {:?}", result.err());
    }
}

/// Test that --status never builds
#[test]
fn test_index_status_without_snapshot() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let args = IndexArgs {
        force: false,
        status: true,
    };
    let result = execute(args, &services, OutputFormat::Json);
    assert!(result.is_ok());
    assert!(services.indexes.loaded().is_none());
    assert!(!services.indexes.indexer().snapshot().exists());
}

/// Test --status after a build and after new sessions appear
#[test]
fn test_index_status_after_build() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());
    services.indexes.rebuild(true);

    corpus.add_session("20241029", "session3", &[("Alice", "New session", "IC")]);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = IndexArgs {
            force: false,
            status: true,
        };
        assert!(execute(args, &services, format).is_ok());
    }
    assert!(services.indexes.is_stale());
}

/// Test that a missing source root still succeeds with an empty index
#[test]
fn test_index_missing_source_root() {
    let corpus = campaign_corpus();
    let missing = corpus.path().join("nope");
    let (services, _cache) = create_test_services(&missing);

    let args = IndexArgs {
        force: true,
        status: false,
    };
    assert!(execute(args, &services, OutputFormat::Human).is_ok());
    assert!(services.indexes.get().is_empty());
}
