//! Doctor command - verify API keys and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Kladd Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    // Check API keys
    println!("{}", style("API Configuration").bold());
    let openai_check = check_openai_api_key(settings);
    openai_check.print();
    checks.push(openai_check);

    let serper_check = check_serper_api_key(settings);
    serper_check.print();
    checks.push(serper_check);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    let content_check = check_content_settings(settings);
    content_check.print();
    checks.push(content_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Kladd.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!(
            "All checks passed with {} warning(s).",
            warnings
        ));
    } else {
        Output::success("All checks passed! Kladd is ready to use.");
    }

    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_openai_api_key(settings: &Settings) -> CheckResult {
    if settings
        .models
        .api_key
        .as_ref()
        .is_some_and(|k| !k.is_empty())
    {
        return CheckResult::ok("OPENAI_API_KEY", "configured via config file");
    }

    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if key.starts_with("sk-") && key.len() > 20 => {
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", mask_key(&key)))
        }
        Ok(key) if key.is_empty() => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Ok(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        Err(_) => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Check if Serper API key is configured.
fn check_serper_api_key(settings: &Settings) -> CheckResult {
    match settings.serper_api_key() {
        Some(key) if key.len() > 10 => {
            CheckResult::ok("SERPER_API_KEY", &format!("configured ({})", mask_key(&key)))
        }
        Some(_) => CheckResult::warning(
            "SERPER_API_KEY",
            "set but looks too short",
            "Get a key from https://serper.dev/ (free tier available)",
        ),
        None => CheckResult::error(
            "SERPER_API_KEY",
            "not set",
            "Get a key from https://serper.dev/ and set with: export SERPER_API_KEY='...'",
        ),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: kladd init (or kladd config edit)",
        )
    }
}

/// Check content targeting settings.
fn check_content_settings(settings: &Settings) -> CheckResult {
    if settings.content.wiki_domain.is_empty() {
        CheckResult::error(
            "Wiki domain",
            "empty",
            "Set content.wiki_domain in the config (e.g., onepiece.fandom.com)",
        )
    } else {
        CheckResult::ok(
            "Wiki domain",
            &format!(
                "{} ({})",
                settings.content.wiki_domain, settings.content.subject
            ),
        )
    }
}

/// Mask an API key for display.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "***".to_string()
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefghijklmnop"), "sk-a...mnop");
        assert_eq!(mask_key("short"), "***");
    }

    #[test]
    fn test_mask_key_multibyte() {
        assert_eq!(mask_key("nøkkel-hemmelig-nøkkel"), "nøkk...kkel");
        assert_eq!(mask_key("ååååå"), "***");
    }

    #[test]
    fn test_check_content_settings_default_ok() {
        let result = check_content_settings(&Settings::default());
        assert_eq!(result.status, CheckStatus::Ok);
    }
}
