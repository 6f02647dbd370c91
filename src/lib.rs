//! Kladd - AI short-video script generator
//!
//! A CLI tool that researches a wiki topic, drafts a short-video script,
//! and edits it into final form.
//!
//! The name "Kladd" comes from the Norwegian word for "rough draft."
//!
//! # Overview
//!
//! Kladd runs a three-stage content pipeline:
//! - **Research**: a search agent picks exactly one viral-worthy wiki page
//! - **Write**: a scraping agent reads that page and drafts a script in a
//!   fixed short-video format
//! - **Edit**: a final pass rewrites the draft for grammar, pacing and length
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt template management
//! - `search` - Web search provider abstraction (Serper)
//! - `scrape` - Page fetching and HTML-to-text extraction
//! - `agent` - Tool-calling LLM agents for the stages
//! - `pipeline` - The three stages themselves
//! - `script` - The script draft entity and format lint
//! - `orchestrator` - Sequential pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use kladd::config::Settings;
//! use kladd::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     // Generate a script about a specific character
//!     let run = orchestrator.generate(Some("Gedatsu")).await?;
//!     println!("{}", run.final_script.text());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod pipeline;
pub mod scrape;
pub mod script;
pub mod search;

pub use error::{KladdError, Result};
