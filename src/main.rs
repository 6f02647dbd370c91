//! Kladd CLI entry point.

use anyhow::Result;
use clap::Parser;
use kladd::cli::{commands, Cli, Commands};
use kladd::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("kladd={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Generate {
            topic,
            model,
            output,
            show_draft,
        } => {
            commands::run_generate(
                topic.as_deref(),
                model.clone(),
                output.clone(),
                *show_draft,
                settings,
            )
            .await?;
        }

        Commands::Research { topic } => {
            commands::run_research(topic.as_deref(), settings).await?;
        }

        Commands::Lint { file } => {
            commands::run_lint(file)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
