//! CLI module for Kladd.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Kladd - AI short-video script generator
///
/// Researches a wiki topic, drafts a short-video script, and edits it into
/// final form. The name "Kladd" comes from the Norwegian word for "rough draft."
#[derive(Parser, Debug)]
#[command(name = "kladd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Kladd and verify API keys
    Init,

    /// Check API keys and configuration
    Doctor,

    /// Generate a short-video script (research -> write -> edit)
    Generate {
        /// Character or topic to focus on (leave out to let the AI choose)
        topic: Option<String>,

        /// LLM model for all three stages (overrides per-stage config)
        #[arg(short, long)]
        model: Option<String>,

        /// Write the final script to a file instead of stdout only
        #[arg(short, long)]
        output: Option<String>,

        /// Also print the unedited draft
        #[arg(long)]
        show_draft: bool,
    },

    /// Run only the research stage and print the selected wiki page
    Research {
        /// Character or topic to focus on (leave out to let the AI choose)
        topic: Option<String>,
    },

    /// Check a script file against the format rules
    Lint {
        /// Path to a script file, or '-' for stdin
        file: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "models.writer")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
