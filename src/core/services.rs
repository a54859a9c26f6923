//! Unified service container for Lorekeeper
//!
//! Provides shared access to the index, the search engine and the
//! exporter.

use std::sync::{Arc, RwLock};

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::export::ResultExporter;
use crate::core::indexer::TranscriptIndexer;
use crate::core::search::SearchEngine;
use crate::core::types::{BuildReport, SearchRequest, SearchResponse, TranscriptIndex};

/// Shared, swappable reference to the current index.
///
/// Searches clone the `Arc` and keep using that index even if a rebuild
/// swaps in a new one meanwhile. A new index only replaces the old one
/// after its build has finished.
pub struct IndexHandle {
    indexer: TranscriptIndexer,
    current: RwLock<Option<Arc<TranscriptIndex>>>,
}

impl IndexHandle {
    pub fn new(indexer: TranscriptIndexer) -> Self {
        Self {
            indexer,
            current: RwLock::new(None),
        }
    }

    pub fn indexer(&self) -> &TranscriptIndexer {
        &self.indexer
    }

    /// Current index, building (or loading) it on first use
    pub fn get(&self) -> Arc<TranscriptIndex> {
        if let Some(index) = self.loaded() {
            return index;
        }

        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        // Another caller may have built it while we waited
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }
        let index = Arc::new(self.indexer.build(false));
        *slot = Some(Arc::clone(&index));
        index
    }

    /// Index already in memory, if any
    pub fn loaded(&self) -> Option<Arc<TranscriptIndex>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(Arc::clone)
    }

    /// Build a new index and swap it in once complete
    pub fn rebuild(&self, force: bool) -> (Arc<TranscriptIndex>, BuildReport) {
        let (index, report) = self.indexer.build_with_report(force);
        let index = Arc::new(index);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&index));
        (index, report)
    }

    /// Drop the snapshot and the in-memory index; the next `get` rebuilds
    pub fn invalidate(&self) -> Result<()> {
        self.indexer.invalidate()?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }

    /// Whether the current index misses sessions present on disk
    pub fn is_stale(&self) -> bool {
        self.indexer.is_stale(&self.get())
    }
}

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Current transcript index
    pub indexes: Arc<IndexHandle>,

    /// Search engine configured from `[search]`
    pub engine: Arc<SearchEngine>,

    pub exporter: ResultExporter,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let indexer = TranscriptIndexer::from_config(&config)?;
        let engine = SearchEngine::new(config.search.clone());

        Ok(Self {
            config: Arc::new(config),
            indexes: Arc::new(IndexHandle::new(indexer)),
            engine: Arc::new(engine),
            exporter: ResultExporter::new(),
        })
    }

    /// Search the current index
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        let index = self.indexes.get();
        self.engine.search(&index, request)
    }
}
