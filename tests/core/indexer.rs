// Indexer integration tests: discovery, isolation, snapshots

use crate::common::{campaign_corpus, indexer_for, TestCorpus};
use lorekeeper::{Classification, TranscriptIndex};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_build_indexes_every_session() {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();

    let (index, report) = indexer_for(corpus.path(), &cache).build_with_report(true);

    assert_eq!(index.session_count(), 2);
    assert_eq!(index.len(), 7);
    assert_eq!(report.sessions_indexed, 2);
    assert!(report.sessions_skipped.is_empty());
    assert_eq!(
        index.speakers().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Alice", "Bob", "Carol", "DM"]
    );

    let session2 = index.session("session2").unwrap();
    assert_eq!(session2.session_date, "2024-10-22");
    assert_eq!(session2.segment_count, 4);
    assert_eq!(session2.speaker_count, 3);
    assert_eq!(session2.ic_percentage, 75.0);
}

#[test]
fn test_segments_keep_session_order() {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();
    let index = indexer_for(corpus.path(), &cache).build(true);

    let lines = index.session_segments("session2");
    assert_eq!(lines.len(), 4);
    for (position, segment) in lines.iter().enumerate() {
        assert_eq!(segment.position, position);
        assert_eq!(segment.session_id, "session2");
    }
    assert_eq!(lines[3].classification, Classification::OutOfCharacter);
    assert_eq!(lines[1].timestamp, 12.5);
    assert_eq!(lines[1].timestamp_str, "00:00:12");
}

#[test]
fn test_rebuild_is_idempotent() {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();
    let indexer = indexer_for(corpus.path(), &cache);

    let first = indexer.build(true);
    let second = indexer.build(true);

    assert_eq!(first.len(), second.len());
    assert_eq!(first.session_count(), second.session_count());
    assert_eq!(first.speakers(), second.speakers());
    assert_eq!(first.segments(), second.segments());
}

#[test]
fn test_corrupt_artifact_is_isolated() {
    let corpus = campaign_corpus();
    corpus.add_raw_session("20241029", "session3", "{ this is not json");
    let cache = TempDir::new().unwrap();

    let indexer = indexer_for(corpus.path(), &cache);
    let (index, report) = indexer.build_with_report(true);

    assert_eq!(index.session_count(), 2);
    assert!(index.session("session3").is_none());
    assert!(!indexer.is_stale(&index));
    assert_eq!(report.sessions_skipped.len(), 1);
    assert_eq!(
        report.sessions_skipped[0].directory,
        "20241029_193000_session3"
    );
}

#[test]
fn test_nonconforming_directories_are_ignored() {
    let corpus = campaign_corpus();
    fs::create_dir_all(corpus.path().join("notes")).unwrap();
    fs::write(corpus.path().join("notes").join("x_data.json"), "{}").unwrap();
    fs::create_dir_all(corpus.path().join("20241101_190000_empty")).unwrap();
    fs::write(corpus.path().join("README.txt"), "not a session").unwrap();
    let cache = TempDir::new().unwrap();

    let index = indexer_for(corpus.path(), &cache).build(true);
    assert_eq!(index.session_count(), 2);
}

#[test]
fn test_missing_fields_use_defaults() {
    let corpus = TestCorpus::new();
    corpus.add_raw_session(
        "20241015",
        "sparse",
        r#"{"segments": [{"text": "Who said this?"}, {"speaker": "DM"}]}"#,
    );
    let cache = TempDir::new().unwrap();

    let index = indexer_for(corpus.path(), &cache).build(true);
    let lines = index.session_segments("sparse");
    assert_eq!(lines[0].speaker, "Unknown");
    assert_eq!(lines[0].classification, Classification::Unknown);
    assert_eq!(lines[1].text, "");

    let meta = index.session("sparse").unwrap();
    assert_eq!(meta.speaker_count, 0);
    assert_eq!(meta.total_duration, 0.0);
}

#[test]
fn test_unreadable_source_root_gives_empty_index() {
    let cache = TempDir::new().unwrap();
    let missing = cache.path().join("does-not-exist");

    let (index, report) = indexer_for(&missing, &cache).build_with_report(true);
    assert!(index.is_empty());
    assert_eq!(index.session_count(), 0);
    assert_eq!(report.sessions_indexed, 0);
}

#[test]
fn test_snapshot_round_trip_and_fallback() {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();
    let indexer = indexer_for(corpus.path(), &cache);

    let (built, report) = indexer.build_with_report(false);
    assert!(!report.from_cache);
    assert!(report.cache_written);

    let (loaded, report) = indexer.build_with_report(false);
    assert!(report.from_cache);
    assert_eq!(loaded.segments(), built.segments());
    assert_eq!(loaded.locate("session2", 2), built.locate("session2", 2));

    fs::write(indexer.snapshot().path(), b"\xff\xfe garbage").unwrap();
    let (rebuilt, report) = indexer.build_with_report(false);
    assert!(!report.from_cache);
    assert_eq!(rebuilt.len(), built.len());
}

#[test]
fn test_snapshot_for_another_root_is_not_used() {
    let first = campaign_corpus();
    let second = TestCorpus::new();
    second.add_session("20250101", "other", &[("Eve", "Hello there", "IC")]);
    let cache = TempDir::new().unwrap();

    indexer_for(first.path(), &cache).build(false);
    let (index, report) = indexer_for(second.path(), &cache).build_with_report(false);

    assert!(!report.from_cache);
    assert_eq!(index.session_count(), 1);
    assert!(index.session("other").is_some());
}

#[test]
fn test_staleness_signal() {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();
    let indexer = indexer_for(corpus.path(), &cache);

    let index = indexer.build(false);
    assert!(!indexer.is_stale(&index));

    corpus.add_session("20241029", "session3", &[("Alice", "Back again", "IC")]);
    assert!(indexer.is_stale(&index));
    assert_eq!(indexer.new_sessions(&index), vec!["20241029_193000_session3"]);

    // Staleness never rebuilds: the snapshot still holds two sessions
    let (cached, report) = indexer.build_with_report(false);
    assert!(report.from_cache);
    assert_eq!(cached.session_count(), 2);

    indexer.invalidate().unwrap();
    let refreshed = indexer.build(false);
    assert_eq!(refreshed.session_count(), 3);
    assert!(!indexer.is_stale(&refreshed));
}

#[test]
fn test_deserialized_index_resolves_positions() {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();
    let index = indexer_for(corpus.path(), &cache).build(true);

    let json = serde_json::to_string(&index).unwrap();
    let copy: TranscriptIndex = serde_json::from_str(&json).unwrap();

    assert_eq!(copy.locate("session2", 2), index.locate("session2", 2));
    assert_eq!(copy.session_segments("session1"), index.session_segments("session1"));
    assert_eq!(copy.session_segments("session2").len(), 4);
}
