//! Configuration settings for Kladd.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub models: ModelSettings,
    pub content: ContentSettings,
    pub search: SearchSettings,
    pub scrape: ScrapeSettings,
    pub pipeline: PipelineSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// LLM model settings for the three pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model for the topic researcher stage.
    pub researcher: String,
    /// Model for the script writer stage.
    pub writer: String,
    /// Model for the editor stage.
    pub editor: String,
    /// Sampling temperature for all stages.
    pub temperature: f32,
    /// OpenAI API key override. None = read OPENAI_API_KEY from the environment.
    pub api_key: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            researcher: "gpt-4o-mini".to_string(),
            writer: "gpt-4o-mini".to_string(),
            editor: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            api_key: None,
        }
    }
}

/// Content targeting settings.
///
/// The defaults target One Piece; point these at another fandom wiki to
/// generate scripts for a different franchise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Franchise or subject the scripts cover.
    pub subject: String,
    /// Wiki domain used for targeted searches and URL selection.
    pub wiki_domain: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            subject: "One Piece".to_string(),
            wiki_domain: "onepiece.fandom.com".to_string(),
        }
    }
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Search provider (serper).
    pub provider: String,
    /// Serper API key override. None = read SERPER_API_KEY from the environment.
    pub api_key: Option<String>,
    /// Search API endpoint.
    pub endpoint: String,
    /// Maximum results to request per search.
    pub max_results: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: "serper".to_string(),
            api_key: None,
            endpoint: "https://google.serper.dev/search".to_string(),
            max_results: 5,
            timeout_seconds: 20,
        }
    }
}

/// Page scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    /// Maximum characters of page text handed to the writer.
    pub max_chars: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent sent with page fetches.
    pub user_agent: String,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            max_chars: 12_000,
            timeout_seconds: 30,
            user_agent: format!("kladd/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Pipeline execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Maximum LLM iterations per agent stage.
    pub max_agent_iterations: usize,
    /// Retry attempts for failed search requests.
    pub search_retries: usize,
    /// Backoff between search retries, in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_agent_iterations: 5,
            search_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::KladdError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kladd")
            .join("config.toml")
    }

    /// Resolve the Serper API key from config or environment.
    pub fn serper_api_key(&self) -> Option<String> {
        self.search
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("SERPER_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.models.researcher, "gpt-4o-mini");
        assert_eq!(settings.content.wiki_domain, "onepiece.fandom.com");
        assert_eq!(settings.search.provider, "serper");
        assert!(settings.pipeline.max_agent_iterations > 0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.models.writer = "gpt-4.1-mini".to_string();
        settings.content.subject = "Naruto".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.models.writer, "gpt-4.1-mini");
        assert_eq!(loaded.content.subject, "Naruto");
        // Untouched sections keep defaults
        assert_eq!(loaded.search.endpoint, Settings::default().search.endpoint);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.models.editor, "gpt-4o-mini");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[models]\nwriter = \"gpt-4o\"\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.models.writer, "gpt-4o");
        assert_eq!(settings.models.researcher, "gpt-4o-mini");
    }
}
