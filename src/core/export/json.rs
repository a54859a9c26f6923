//! JSON export: a pretty-printed array of flat result records.

use crate::core::error::Result;
use crate::core::types::SearchResult;

pub(super) fn render(results: &[SearchResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
