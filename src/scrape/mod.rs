//! Web page fetching for the script writer.

mod page;

pub use page::HttpPageReader;

use crate::error::Result;
use async_trait::async_trait;

/// Text content extracted from a web page.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// The URL the content was fetched from.
    pub url: String,
    /// Plain text extracted from the page, truncated to the configured budget.
    pub text: String,
    /// Whether the text was truncated.
    pub truncated: bool,
}

/// Trait for fetching page content as plain text.
#[async_trait]
pub trait PageReader: Send + Sync {
    /// Fetch a page and return its text content.
    async fn read(&self, url: &str) -> Result<PageContent>;
}
