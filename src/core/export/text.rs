//! Plain-text export: one numbered block per result.

use std::fmt::Write;

use crate::core::types::SearchResult;

const RULE: &str = "----------------------------------------";

pub(super) fn render(results: &[SearchResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transcript search results: {}", results.len());
    let _ = writeln!(out, "{RULE}");

    if results.is_empty() {
        let _ = writeln!(out, "No results.");
        return out;
    }

    for (i, result) in results.iter().enumerate() {
        let seg = &result.segment;
        let _ = writeln!(out, "[{}] {} ({})", i + 1, seg.session_id, seg.session_date);
        let _ = writeln!(
            out,
            "    Time:           {} ({}s)",
            seg.timestamp_str, seg.timestamp
        );
        let _ = writeln!(out, "    Speaker:        {}", seg.speaker);
        let _ = writeln!(out, "    Classification: {}", seg.classification);
        let _ = writeln!(out, "    Score:          {}", result.relevance_score);
        let _ = writeln!(out, "    Match:          {}", result.matched_excerpt);
        let _ = writeln!(out, "    Text:");
        // split keeps trailing empty lines and `\r`, unlike lines()
        for line in seg.text.split('\n') {
            let _ = writeln!(out, "        {line}");
        }
        write_context(&mut out, "Before", &result.context_before);
        write_context(&mut out, "After", &result.context_after);
        let _ = writeln!(out, "{RULE}");
    }

    out
}

fn write_context(out: &mut String, label: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "    {label}:");
    for line in lines {
        let _ = writeln!(out, "        {line}");
    }
}
