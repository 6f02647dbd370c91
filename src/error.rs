//! Error types for Kladd.

use thiserror::Error;

/// Library-level error type for Kladd operations.
#[derive(Error, Debug)]
pub enum KladdError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Web search failed: {0}")]
    Search(String),

    #[error("Page fetch failed: {0}")]
    Scrape(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Kladd operations.
pub type Result<T> = std::result::Result<T, KladdError>;
