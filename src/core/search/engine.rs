//! Search over a transcript index.
//!
//! The engine holds only configuration; the index is passed in on
//! every call, so several independent indexes can be searched with the
//! same engine.

use std::cmp::Ordering;
use std::time::Instant;

use crate::core::config::SearchConfig;
use crate::core::error::QueryError;
use crate::core::search::context::{self, ContextWindow};
use crate::core::search::matcher::{Hit, Matcher};
use crate::core::search::scoring::Scorer;
use crate::core::types::{
    RankingStrategy, SearchRequest, SearchResponse, SearchResult, TranscriptIndex,
};

/// A match found during the scan, before context is attached
struct Candidate {
    index_pos: usize,
    hit: Hit,
    score: f64,
}

/// Search engine
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    /// Create a new search engine
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Result limit for a request, clamped to the configured maximum
    pub fn effective_limit(&self, request: &SearchRequest) -> usize {
        request
            .max_results
            .unwrap_or(self.config.default_max_results)
            .min(self.config.max_results_limit)
    }

    /// Execute a search.
    ///
    /// Never fails: a rejected query comes back as an empty response
    /// with `error` set, which is distinct from "no matches".
    pub fn search(&self, index: &TranscriptIndex, request: &SearchRequest) -> SearchResponse {
        let start = Instant::now();

        if request.query.trim().is_empty() {
            return SearchResponse::empty(request);
        }

        let length = request.query.chars().count();
        if length > self.config.max_query_length {
            return SearchResponse::rejected(
                request,
                QueryError::TooLong {
                    length,
                    max: self.config.max_query_length,
                },
            );
        }

        let matcher = match Matcher::compile(&request.query, request.mode) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Rejected query: {}", e);
                return SearchResponse::rejected(request, e);
            }
        };

        let limit = self.effective_limit(request);
        let scorer = Scorer::new(&request.query);
        let bounded_scan = self.config.ranking == RankingStrategy::ScanOrder;

        let mut candidates = Vec::new();
        if limit > 0 {
            for (index_pos, segment) in index.segments().iter().enumerate() {
                if !request.filters.accepts(segment) {
                    continue;
                }
                let Some(hit) = matcher.find(&segment.text) else {
                    continue;
                };
                candidates.push(Candidate {
                    index_pos,
                    hit,
                    score: scorer.score(segment),
                });
                if bounded_scan && candidates.len() >= limit {
                    break;
                }
            }
        }

        let matched = candidates.len();

        // sort_by is stable: ties keep scan order
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates.truncate(limit);

        let segments = index.segments();
        let results: Vec<SearchResult> = candidates
            .into_iter()
            .map(|c| {
                let segment = &segments[c.index_pos];
                let window = if request.include_context {
                    context::window(index, c.index_pos, self.config.context_window)
                } else {
                    ContextWindow::default()
                };
                SearchResult {
                    matched_excerpt: matcher.excerpt(
                        &segment.text,
                        &c.hit,
                        self.config.excerpt_radius,
                    ),
                    relevance_score: c.score,
                    context_before: window.before,
                    context_after: window.after,
                    segment: segment.clone(),
                }
            })
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Search '{}' ({}): {} matches, {} returned in {}ms",
            request.query,
            request.mode,
            matched,
            results.len(),
            duration_ms
        );

        SearchResponse {
            query: request.query.clone(),
            mode: request.mode,
            count: results.len(),
            results,
            duration_ms,
            error: None,
        }
    }

    /// Context window of the segment at `position` in `session_id`
    pub fn context_for(
        &self,
        index: &TranscriptIndex,
        session_id: &str,
        position: usize,
    ) -> Option<ContextWindow> {
        let index_pos = index.locate(session_id, position)?;
        Some(context::window(index, index_pos, self.config.context_window))
    }
}
