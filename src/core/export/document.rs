//! Markdown report export.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::types::SearchResult;

pub(super) fn render(results: &[SearchResult]) -> String {
    let mut out = String::from("# Transcript Search Results\n\n");

    let sessions: BTreeSet<&str> = results
        .iter()
        .map(|r| r.segment.session_id.as_str())
        .collect();
    let _ = writeln!(out, "- **Results:** {}", results.len());
    if !sessions.is_empty() {
        let _ = writeln!(
            out,
            "- **Sessions:** {}",
            sessions.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    out.push('\n');

    if results.is_empty() {
        out.push_str("_No results._\n");
        return out;
    }

    for (i, result) in results.iter().enumerate() {
        let seg = &result.segment;
        let _ = writeln!(
            out,
            "## {}. {} in {} at {}\n",
            i + 1,
            seg.speaker,
            seg.session_id,
            seg.timestamp_str
        );
        out.push_str("| Field | Value |\n|---|---|\n");
        row(&mut out, "Session", &seg.session_id);
        row(&mut out, "Date", &seg.session_date);
        row(
            &mut out,
            "Timestamp",
            &format!("{} ({}s)", seg.timestamp_str, seg.timestamp),
        );
        row(&mut out, "Speaker", &seg.speaker);
        row(&mut out, "Classification", seg.classification.as_str());
        row(&mut out, "Score", &result.relevance_score.to_string());
        row(&mut out, "Excerpt", &result.matched_excerpt);
        out.push('\n');

        quote(&mut out, &seg.text);
        context(&mut out, "Context before", &result.context_before);
        context(&mut out, "Context after", &result.context_after);
    }

    out
}

fn row(out: &mut String, field: &str, value: &str) {
    let _ = writeln!(out, "| {} | {} |", field, cell(value));
}

/// Table cells cannot hold raw pipes or newlines
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', "<br>")
}

fn quote(out: &mut String, text: &str) {
    if text.is_empty() {
        out.push_str(">\n\n");
        return;
    }
    // split keeps trailing empty lines and `\r`, unlike lines()
    for line in text.split('\n') {
        let _ = writeln!(out, "> {line}");
    }
    out.push('\n');
}

fn context(out: &mut String, label: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "**{label}**\n");
    for line in lines {
        let _ = writeln!(out, "- {line}");
    }
    out.push('\n');
}
