// Common test utilities and fixtures

pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in some test crates but are used in others
#[allow(unused_imports)]
pub use fixtures::{campaign_corpus, TestCorpus};
#[allow(unused_imports)]
pub use helpers::{create_test_services, indexer_for, result_fields};
