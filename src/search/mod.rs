//! Web search for topic research.

mod serper;

pub use serper::SerperSearch;

use crate::error::Result;
use async_trait::async_trait;

/// A single web search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Trait for web search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search query and return up to `max_results` hits.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;

    /// Provider name for logging and diagnostics.
    fn name(&self) -> &str;
}
