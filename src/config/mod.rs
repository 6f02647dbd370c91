//! Configuration module for Kladd.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{EditorPrompts, Prompts, ResearcherPrompts, WriterPrompts};
pub use settings::{
    ContentSettings, GeneralSettings, ModelSettings, PipelineSettings, PromptSettings,
    ScrapeSettings, SearchSettings, Settings,
};
