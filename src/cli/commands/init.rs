//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Kladd Setup");
    println!();
    println!("Welcome to Kladd! Let's make sure everything is configured correctly.\n");

    // Step 1: Check OpenAI key
    println!("{}", style("Step 1: Checking OpenAI API key").bold().cyan());
    println!();

    let has_openai = settings
        .models
        .api_key
        .as_ref()
        .is_some_and(|k| !k.is_empty())
        || std::env::var("OPENAI_API_KEY").is_ok_and(|k| !k.is_empty());

    if !has_openai {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  Kladd requires an OpenAI API key for the research, writing and editing stages.");
        println!("  Get your API key from: {}", style("https://platform.openai.com/api-keys").underlined());
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'kladd init' again.");
            return Ok(());
        }
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 2: Check Serper key
    println!("{}", style("Step 2: Checking search API key").bold().cyan());
    println!();

    if settings.serper_api_key().is_none() {
        Output::warning("SERPER_API_KEY environment variable is not set.");
        println!();
        println!("  Kladd uses Serper for the topic research searches.");
        println!("  Get a free key from: {}", style("https://serper.dev/").underlined());
        println!();
        println!("  Set it in your shell configuration:");
        println!("  {}", style("export SERPER_API_KEY='...'").green());
        println!();

        if !prompt_continue("Continue without search key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'kladd init' again.");
            return Ok(());
        }
    } else {
        Output::success("Serper API key is configured!");
    }

    println!();

    // Step 3: Create config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("kladd config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("kladd doctor").cyan());
    println!("  {} Generate your first script", style("kladd generate").cyan());
    println!("  {} Focus on a specific character", style("kladd generate \"Gedatsu\"").cyan());
    println!();
    println!("For more help: {}", style("kladd --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
