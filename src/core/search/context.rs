//! Context windows around a matching segment.

use serde::{Deserialize, Serialize};

use crate::core::types::TranscriptIndex;

/// Neighbouring lines of a segment, same session only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Collect up to `radius` neighbours on each side of the segment at
/// `index_pos` in the index's segment sequence.
///
/// Stops extending in a direction as soon as a neighbour belongs to
/// another session.
pub fn window(index: &TranscriptIndex, index_pos: usize, radius: usize) -> ContextWindow {
    let segments = index.segments();
    let Some(anchor) = segments.get(index_pos) else {
        return ContextWindow::default();
    };

    let mut before: Vec<String> = segments[..index_pos]
        .iter()
        .rev()
        .take(radius)
        .take_while(|s| s.session_id == anchor.session_id)
        .map(|s| s.display_line())
        .collect();
    before.reverse();

    let after = segments[index_pos + 1..]
        .iter()
        .take(radius)
        .take_while(|s| s.session_id == anchor.session_id)
        .map(|s| s.display_line())
        .collect();

    ContextWindow { before, after }
}
