// Export integration tests: real search results written and read back

use crate::common::{campaign_corpus, indexer_for, result_fields};
use lorekeeper::core::config::SearchConfig;
use lorekeeper::core::export::CSV_HEADER;
use lorekeeper::{
    ExportFormat, ResultExporter, SearchEngine, SearchMode, SearchRequest, SearchResult,
};
use std::fs;
use tempfile::TempDir;

fn dragon_results() -> Vec<SearchResult> {
    let corpus = campaign_corpus();
    let cache = TempDir::new().unwrap();
    let index = indexer_for(corpus.path(), &cache).build(true);

    let request = SearchRequest::new("a", SearchMode::FullText).with_context(true);
    SearchEngine::new(SearchConfig::default())
        .search(&index, &request)
        .results
}

#[test]
fn test_json_round_trip() {
    let results = dragon_results();
    assert!(!results.is_empty());
    let out = TempDir::new().unwrap();
    let path = out.path().join("results.json");

    assert!(ResultExporter::new().export(&results, ExportFormat::Json, &path));

    let parsed: Vec<SearchResult> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.len(), results.len());
    for (original, reparsed) in results.iter().zip(&parsed) {
        assert_eq!(result_fields(original), result_fields(reparsed));
        assert_eq!(original.context_before, reparsed.context_before);
        assert_eq!(original.context_after, reparsed.context_after);
        assert_eq!(original.segment.timestamp, reparsed.segment.timestamp);
    }
}

#[test]
fn test_csv_rows_match_results() {
    let results = dragon_results();
    let out = TempDir::new().unwrap();
    let path = out.path().join("results.csv");

    assert!(ResultExporter::new().export(&results, ExportFormat::Csv, &path));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADER);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), results.len());
    for (row, result) in rows.iter().zip(&results) {
        assert_eq!(&row[0], result.segment.session_id);
        assert_eq!(&row[1], result.segment.session_date);
        assert_eq!(&row[3], result.segment.speaker);
        assert_eq!(&row[4], result.segment.classification.as_str());
        assert_eq!(&row[5], result.segment.text);
        assert_eq!(&row[6], result.matched_excerpt);
        assert_eq!(row[7].parse::<f64>().unwrap(), result.relevance_score);
        assert_eq!(&row[9], result.context_before.join("\n"));
    }
}

#[test]
fn test_text_and_document_reports() {
    let results = dragon_results();
    let exporter = ResultExporter::new();

    let text = exporter.render(&results, ExportFormat::Text).unwrap();
    let document = exporter.render(&results, ExportFormat::Document).unwrap();

    for result in &results {
        assert!(text.contains(&result.segment.text));
        assert!(document.contains(&format!("> {}", result.segment.text)));
    }
    assert!(text.starts_with(&format!("Transcript search results: {}", results.len())));
    assert!(document.contains(&format!("- **Results:** {}", results.len())));
}

#[test]
fn test_export_preserves_given_order() {
    let mut results = dragon_results();
    results.reverse();

    let json = ResultExporter::new()
        .render(&results, ExportFormat::Json)
        .unwrap();
    let parsed: Vec<SearchResult> = serde_json::from_str(&json).unwrap();
    let speakers: Vec<&str> = parsed.iter().map(|r| r.segment.speaker.as_str()).collect();
    let expected: Vec<&str> = results.iter().map(|r| r.segment.speaker.as_str()).collect();
    assert_eq!(speakers, expected);
}

#[test]
fn test_unwritable_destination_reports_false() {
    let results = dragon_results();
    let out = TempDir::new().unwrap();
    let blocker = out.path().join("file");
    fs::write(&blocker, "x").unwrap();

    for format in ExportFormat::ALL {
        let path = blocker.join(format!("results.{}", format.extension()));
        assert!(!ResultExporter::new().export(&results, format, &path));
    }
}
