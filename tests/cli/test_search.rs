//! Tests for the search CLI command
//!
//! - Valid queries with results, in both output formats
//! - Filters built from arguments
//! - Rejected queries
//! - --export

use crate::common::{campaign_corpus, create_test_services};
use lorekeeper::cli::commands::search::{
    execute, ClassificationArg, ExportArg, ModeArg, SearchArgs,
};
use lorekeeper::cli::OutputFormat;
use lorekeeper::{Classification, SearchMode, SearchResult};
use std::fs;
use tempfile::TempDir;

fn args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        mode: ModeArg::FullText,
        speaker: Vec::new(),
        classification: None,
        session: Vec::new(),
        min_time: None,
        max_time: None,
        date_from: None,
        date_to: None,
        limit: None,
        context: false,
        export: None,
        output: None,
    }
}

/// Test search with results in human format
#[test]
fn test_search_valid_query_human() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let mut search = args("dragon");
    search.context = true;
    let result = execute(search, &services, OutputFormat::Human);
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
}

/// Test search in JSON format
#[test]
fn test_search_valid_query_json() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let result = execute(args("market"), &services, OutputFormat::Json);
    assert!(result.is_ok(), "JSON search should succeed: {:?}", result.err());
}

/// Test search with no matches
#[test]
fn test_search_empty_results() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let result = execute(args("beholder"), &services, OutputFormat::Human);
    assert!(result.is_ok(), "Search with no results should succeed");
}

/// Test that an invalid regex is reported as an error
#[test]
fn test_search_invalid_regex() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let mut search = args("((");
    search.mode = ModeArg::Regex;
    let err = execute(search, &services, OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("Query rejected"));
}

/// Test that an inverted time window is rejected before searching
#[test]
fn test_search_inverted_time_window() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let mut search = args("a");
    search.min_time = Some(60.0);
    search.max_time = Some(30.0);
    assert!(execute(search, &services, OutputFormat::Human).is_err());
    assert!(services.indexes.loaded().is_none());
}

/// Test that arguments map onto the request
#[test]
fn test_search_args_to_request() {
    let mut search = args("break");
    search.mode = ModeArg::Exact;
    search.speaker = vec!["DM".to_string()];
    search.classification = Some(ClassificationArg::Ooc);
    search.session = vec!["session1".to_string()];
    search.min_time = Some(5.0);
    search.date_from = Some("2024-10-01".to_string());
    search.limit = Some(3);
    search.context = true;

    let request = search.to_request();
    assert_eq!(request.mode, SearchMode::Exact);
    assert!(request.filters.speakers.contains("DM"));
    assert_eq!(
        request.filters.classification,
        Some(Classification::OutOfCharacter)
    );
    assert!(request.filters.session_ids.contains("session1"));
    assert_eq!(request.filters.min_seconds, Some(5.0));
    assert_eq!(request.filters.date_from.as_deref(), Some("2024-10-01"));
    assert_eq!(request.max_results, Some(3));
    assert!(request.include_context);
}

/// Test filtered search results through services
#[test]
fn test_search_filters_through_services() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());

    let mut search = args("break");
    search.classification = Some(ClassificationArg::Ooc);
    let response = services.search(&search.to_request());
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].segment.speaker, "DM");
}

/// Test --export writes the requested file
#[test]
fn test_search_export_json() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());
    let out = TempDir::new().unwrap();
    let path = out.path().join("dragon.json");

    let mut search = args("dragon");
    search.export = Some(ExportArg::Json);
    search.output = Some(path.clone());
    let result = execute(search, &services, OutputFormat::Human);
    assert!(result.is_ok(), "Export should succeed: {:?}", result.err());

    let parsed: Vec<SearchResult> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].segment.speaker, "Alice");
}

/// Test --export to an unwritable destination fails the command
#[test]
fn test_search_export_failure() {
    let corpus = campaign_corpus();
    let (services, _cache) = create_test_services(corpus.path());
    let out = TempDir::new().unwrap();
    let blocker = out.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let mut search = args("dragon");
    search.export = Some(ExportArg::Document);
    search.output = Some(blocker.join("report.md"));
    let err = execute(search, &services, OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("Could not export"));
}
