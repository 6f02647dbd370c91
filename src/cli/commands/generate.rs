//! Generate command implementation - the full three-stage pipeline.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the generate command.
pub async fn run_generate(
    topic: Option<&str>,
    model: Option<String>,
    output: Option<String>,
    show_draft: bool,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'kladd doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    // A --model override applies to all three stages
    let mut settings = settings;
    if let Some(model) = model {
        settings.models.researcher = model.clone();
        settings.models.writer = model.clone();
        settings.models.editor = model;
    }

    let orchestrator = Orchestrator::new(settings)?;

    match topic {
        Some(topic) => Output::info(&format!("Generating a short script about '{}'...", topic)),
        None => Output::info("Generating a short script (AI picks the topic)..."),
    }

    match orchestrator.generate(topic).await {
        Ok(run) => {
            if show_draft {
                Output::header("Unedited draft");
                Output::script(&run.draft);
            }

            Output::header("Your short script");
            Output::script(&run.final_script);

            Output::kv("Source", &run.brief.url);
            Output::kv("Words", &run.final_script.word_count().to_string());

            if !run.findings.is_empty() {
                Output::warning("Format findings:");
                for finding in &run.findings {
                    Output::finding(finding);
                }
            }

            if let Some(path) = output {
                std::fs::write(&path, format!("{}\n", run.final_script.text()))?;
                Output::success(&format!("Script written to {}", path));
            }

            println!();
            Output::info(
                "Tip: this script is optimized for 45-60 seconds of reading time. \
                 Practice your delivery for maximum engagement!",
            );
        }
        Err(e) => {
            Output::error(&format!("Script generation failed: {}", e));
            Output::info("Please check your API keys and try again.");
            return Err(e.into());
        }
    }

    Ok(())
}
