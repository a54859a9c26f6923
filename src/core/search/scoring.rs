//! Relevance scoring.
//!
//! ```text
//! score = 1.0
//!       + 0.5 * non-overlapping occurrences of the query (case-insensitive)
//!       + 0.2 if the segment is in-character
//!       + 0.3 * (1 - first_occurrence_char_offset / text_char_len)
//! ```
//!
//! The same formula is used for every mode. The query is always treated
//! as a literal string here, so a regex whose source text never appears
//! in the segment only earns the base and classification terms.

use crate::core::search::matcher::fold_case;
use crate::core::types::{Classification, Segment};

const BASE: f64 = 1.0;
const OCCURRENCE_WEIGHT: f64 = 0.5;
const IN_CHARACTER_BONUS: f64 = 0.2;
const POSITION_WEIGHT: f64 = 0.3;

/// Scores segments against one query
#[derive(Debug, Clone)]
pub struct Scorer {
    folded_query: String,
}

impl Scorer {
    pub fn new(query: &str) -> Self {
        Self {
            folded_query: fold_case(query),
        }
    }

    pub fn score(&self, segment: &Segment) -> f64 {
        let mut score = BASE;

        if segment.classification == Classification::InCharacter {
            score += IN_CHARACTER_BONUS;
        }

        if self.folded_query.is_empty() {
            return score;
        }

        let text = fold_case(&segment.text);
        let occurrences = text.matches(self.folded_query.as_str()).count();
        score += OCCURRENCE_WEIGHT * occurrences as f64;

        if let Some(byte) = text.find(self.folded_query.as_str()) {
            let len = text.chars().count();
            if len > 0 {
                let offset = text[..byte].chars().count();
                score += POSITION_WEIGHT * (1.0 - offset as f64 / len as f64);
            }
        }

        score
    }
}
