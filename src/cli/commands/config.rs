//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use crate::error::KladdError;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let mut settings = settings;
            set_value(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
            Output::info(&format!(
                "Saved to {}",
                Settings::default_config_path().display()
            ));
        }

        ConfigAction::Edit => {
            let config_path = Settings::default_config_path();

            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save()?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            // Try to open in editor
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a "section.field" assignment to the settings.
fn set_value(settings: &mut Settings, key: &str, value: &str) -> crate::error::Result<()> {
    fn parse<T: std::str::FromStr>(key: &str, value: &str) -> crate::error::Result<T> {
        value.parse().map_err(|_| {
            KladdError::Config(format!("Invalid value '{}' for {}", value, key))
        })
    }

    match key {
        "general.log_level" => settings.general.log_level = value.to_string(),

        "models.researcher" => settings.models.researcher = value.to_string(),
        "models.writer" => settings.models.writer = value.to_string(),
        "models.editor" => settings.models.editor = value.to_string(),
        "models.temperature" => settings.models.temperature = parse(key, value)?,
        "models.api_key" => settings.models.api_key = Some(value.to_string()),

        "content.subject" => settings.content.subject = value.to_string(),
        "content.wiki_domain" => settings.content.wiki_domain = value.to_string(),

        "search.provider" => settings.search.provider = value.to_string(),
        "search.api_key" => settings.search.api_key = Some(value.to_string()),
        "search.endpoint" => settings.search.endpoint = value.to_string(),
        "search.max_results" => settings.search.max_results = parse(key, value)?,
        "search.timeout_seconds" => settings.search.timeout_seconds = parse(key, value)?,

        "scrape.max_chars" => settings.scrape.max_chars = parse(key, value)?,
        "scrape.timeout_seconds" => settings.scrape.timeout_seconds = parse(key, value)?,
        "scrape.user_agent" => settings.scrape.user_agent = value.to_string(),

        "pipeline.max_agent_iterations" => {
            settings.pipeline.max_agent_iterations = parse(key, value)?
        }
        "pipeline.search_retries" => settings.pipeline.search_retries = parse(key, value)?,
        "pipeline.retry_backoff_ms" => settings.pipeline.retry_backoff_ms = parse(key, value)?,

        "prompts.custom_dir" => settings.prompts.custom_dir = Some(value.to_string()),

        _ => {
            return Err(KladdError::Config(format!(
                "Unknown configuration key: {} (try 'kladd config show' for the key names)",
                key
            )))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_string_values() {
        let mut settings = Settings::default();
        set_value(&mut settings, "models.writer", "gpt-4o").unwrap();
        set_value(&mut settings, "content.subject", "Naruto").unwrap();

        assert_eq!(settings.models.writer, "gpt-4o");
        assert_eq!(settings.content.subject, "Naruto");
    }

    #[test]
    fn test_set_numeric_values() {
        let mut settings = Settings::default();
        set_value(&mut settings, "pipeline.max_agent_iterations", "8").unwrap();
        set_value(&mut settings, "models.temperature", "0.4").unwrap();

        assert_eq!(settings.pipeline.max_agent_iterations, 8);
        assert_eq!(settings.models.temperature, 0.4);
    }

    #[test]
    fn test_set_optional_values() {
        let mut settings = Settings::default();
        set_value(&mut settings, "search.api_key", "serper-123").unwrap();
        assert_eq!(settings.search.api_key.as_deref(), Some("serper-123"));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut settings = Settings::default();
        let result = set_value(&mut settings, "models.nope", "x");
        assert!(matches!(result, Err(KladdError::Config(_))));
    }

    #[test]
    fn test_set_invalid_number() {
        let mut settings = Settings::default();
        let result = set_value(&mut settings, "search.max_results", "lots");
        assert!(matches!(result, Err(KladdError::Config(_))));
    }
}
