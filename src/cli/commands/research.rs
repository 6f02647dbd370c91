//! Research command implementation - stage 1 alone.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the research command.
pub async fn run_research(topic: Option<&str>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Research, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'kladd doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Researching viral topics...");

    match orchestrator.research(topic).await {
        Ok(brief) => {
            spinner.finish_and_clear();

            Output::header("Research brief");
            Output::kv("URL", &brief.url);
            if let Some(hint) = &brief.topic_hint {
                Output::kv("Topic hint", hint);
            }
            println!("\n{}\n", brief.rationale);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Research failed: {}", e));
            Output::info("Please check your API keys and try again.");
            return Err(e.into());
        }
    }

    Ok(())
}
