//! Pre-flight checks before expensive operations.
//!
//! Validates that required API keys are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{KladdError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Full pipeline requires both OpenAI and search keys.
    Generate,
    /// Research alone requires both OpenAI and search keys.
    Research,
    /// Lint is offline.
    Lint,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Generate | Operation::Research => {
            check_openai_key(settings)?;
            check_serper_key(settings)?;
        }
        Operation::Lint => {
            // No external requirements for lint
        }
    }
    Ok(())
}

/// Check if an OpenAI API key is configured.
fn check_openai_key(settings: &Settings) -> Result<()> {
    if settings
        .models
        .api_key
        .as_ref()
        .is_some_and(|k| !k.is_empty())
    {
        return Ok(());
    }

    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(KladdError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(KladdError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check if a Serper API key is configured.
fn check_serper_key(settings: &Settings) -> Result<()> {
    match settings.serper_api_key() {
        Some(_) => Ok(()),
        None => Err(KladdError::Config(
            "SERPER_API_KEY not set. Get a key from https://serper.dev/ and set it with: \
             export SERPER_API_KEY='...'"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_lint_no_requirements() {
        // Lint should always pass pre-flight (offline operation)
        assert!(check(Operation::Lint, &Settings::default()).is_ok());
    }

    #[test]
    fn test_config_keys_satisfy_preflight() {
        let mut settings = Settings::default();
        settings.models.api_key = Some("sk-test".to_string());
        settings.search.api_key = Some("serper-test".to_string());

        assert!(check_openai_key(&settings).is_ok());
        assert!(check_serper_key(&settings).is_ok());
    }
}
