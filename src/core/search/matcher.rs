//! Per-mode match tests and excerpt extraction.
//!
//! All comparisons are case-insensitive. Case folding maps each char to
//! exactly one char, so a char offset found in folded text is also valid
//! in the original text.

use regex::{Regex, RegexBuilder};

use crate::core::error::QueryError;
use crate::core::types::SearchMode;

/// Marker for text cut off on either side of an excerpt
pub const ELLIPSIS: &str = "...";

/// Lowercase char-for-char.
///
/// Chars whose lowercase form expands to several chars are kept as-is.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

/// Where a query matched inside a segment text
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Offset of the first match, in chars
    pub char_offset: usize,
    /// Length of the first match, in chars
    pub char_len: usize,
}

/// Compiled form of a query for one search mode
#[derive(Debug)]
pub enum Matcher {
    /// Case-insensitive substring containment
    FullText { folded: String },
    /// Case-insensitive pattern
    Regex(Regex),
    /// Literal phrase, metacharacters escaped
    Exact(Regex),
}

impl Matcher {
    /// Compile `query` for `mode`
    ///
    /// # Errors
    ///
    /// `QueryError::InvalidPattern` when a regex query does not compile.
    pub fn compile(query: &str, mode: SearchMode) -> std::result::Result<Self, QueryError> {
        match mode {
            SearchMode::FullText => Ok(Matcher::FullText {
                folded: fold_case(query),
            }),
            SearchMode::Regex => Ok(Matcher::Regex(case_insensitive(query)?)),
            SearchMode::Exact => Ok(Matcher::Exact(case_insensitive(&regex::escape(query))?)),
        }
    }

    /// First match of the query in `text`, if any
    pub fn find(&self, text: &str) -> Option<Hit> {
        match self {
            Matcher::FullText { folded } => {
                let haystack = fold_case(text);
                let byte = haystack.find(folded.as_str())?;
                Some(Hit {
                    char_offset: haystack[..byte].chars().count(),
                    char_len: folded.chars().count(),
                })
            }
            Matcher::Regex(re) | Matcher::Exact(re) => {
                let m = re.find(text)?;
                Some(Hit {
                    char_offset: text[..m.start()].chars().count(),
                    char_len: m.as_str().chars().count(),
                })
            }
        }
    }

    /// Excerpt shown for a hit.
    ///
    /// Regex mode shows the matched substring alone; the other modes pad
    /// the match with up to `radius` chars of context on each side.
    pub fn excerpt(&self, text: &str, hit: &Hit, radius: usize) -> String {
        match self {
            Matcher::Regex(_) => text
                .chars()
                .skip(hit.char_offset)
                .take(hit.char_len)
                .collect(),
            Matcher::FullText { .. } | Matcher::Exact(_) => padded_excerpt(text, hit, radius),
        }
    }
}

fn case_insensitive(pattern: &str) -> std::result::Result<Regex, QueryError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Match plus up to `radius` chars on each side, with ellipses where cut
pub fn padded_excerpt(text: &str, hit: &Hit, radius: usize) -> String {
    let total = text.chars().count();
    let start = hit.char_offset.saturating_sub(radius);
    let end = (hit.char_offset + hit.char_len + radius).min(total);

    let mut excerpt = String::new();
    if start > 0 {
        excerpt.push_str(ELLIPSIS);
    }
    excerpt.extend(text.chars().skip(start).take(end - start));
    if end < total {
        excerpt.push_str(ELLIPSIS);
    }
    excerpt
}
