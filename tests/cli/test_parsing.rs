//! Tests for clap argument parsing and shell completions

use clap::Parser;
use clap_complete::Shell;
use lorekeeper::cli::commands::completions::write_completions;
use lorekeeper::cli::commands::search::{ExportArg, ModeArg};
use lorekeeper::cli::{Cli, Commands, OutputFormat};

#[test]
fn test_parse_search_with_filters() {
    let cli = Cli::try_parse_from([
        "lorekeeper",
        "--format",
        "json",
        "search",
        "dragon",
        "--mode",
        "regex",
        "--speaker",
        "Alice",
        "--speaker",
        "Bob",
        "--classification",
        "ic",
        "--min-time",
        "1:30",
        "--date-from",
        "20241015",
        "-k",
        "5",
        "--context",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    let Commands::Search(args) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.query, "dragon");
    assert_eq!(args.mode, ModeArg::Regex);
    assert_eq!(args.speaker, vec!["Alice", "Bob"]);
    assert_eq!(args.min_time, Some(90.0));
    assert_eq!(args.date_from.as_deref(), Some("2024-10-15"));
    assert_eq!(args.limit, Some(5));
    assert!(args.context);
}

#[test]
fn test_parse_rejects_bad_values() {
    assert!(Cli::try_parse_from(["lorekeeper", "search", "x", "--date-to", "soon"]).is_err());
    assert!(Cli::try_parse_from(["lorekeeper", "search", "x", "--mode", "fuzzy"]).is_err());
    assert!(Cli::try_parse_from(["lorekeeper", "index", "--force", "--status"]).is_err());
}

#[test]
fn test_export_requires_output() {
    assert!(Cli::try_parse_from(["lorekeeper", "search", "x", "--export", "csv"]).is_err());

    let cli = Cli::try_parse_from([
        "lorekeeper", "search", "x", "--export", "document", "-o", "out.md",
    ])
    .unwrap();
    let Commands::Search(args) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.export, Some(ExportArg::Document));
}

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from([
        "lorekeeper",
        "list-sessions",
        "--source",
        "/campaign",
        "--verbose",
        "--log-json",
    ])
    .unwrap();
    assert_eq!(cli.source.as_deref(), Some(std::path::Path::new("/campaign")));
    assert!(cli.verbose);
    assert!(cli.log_json);
    assert_eq!(cli.format, OutputFormat::Human);
}

#[test]
fn test_completions_mention_commands() {
    let mut out = Vec::new();
    write_completions(Shell::Bash, &mut out).unwrap();
    let script = String::from_utf8(out).unwrap();
    assert!(script.contains("lorekeeper"));
    assert!(script.contains("list-sessions"));
}
