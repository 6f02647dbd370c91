//! Script writer stage.
//!
//! Reads the researched wiki page and drafts a script in the fixed
//! short-video format.

use super::{date_stamped, ResearchBrief};
use crate::agent::{StageAgent, ToolContext, ToolSet};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::script::ScriptDraft;
use std::collections::HashMap;
use tracing::{info, instrument};

/// Stage 2: wiki page -> script draft.
pub struct ScriptWriter {
    agent: StageAgent,
    prompts: Prompts,
}

impl ScriptWriter {
    /// Create the writer stage.
    pub fn new(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        tools: ToolContext,
        settings: &Settings,
        prompts: Prompts,
    ) -> Self {
        let system =
            date_stamped(&prompts.render_with_custom(&prompts.writer.system, &HashMap::new()));

        let agent = StageAgent::new(
            client,
            tools,
            ToolSet::Write,
            &settings.models.writer,
            &system,
        )
        .with_temperature(settings.models.temperature)
        .with_max_iterations(settings.pipeline.max_agent_iterations);

        Self { agent, prompts }
    }

    /// Draft a script from the research brief.
    #[instrument(skip(self, brief), fields(url = %brief.url))]
    pub async fn run(&self, brief: &ResearchBrief) -> Result<ScriptDraft> {
        let mut vars = HashMap::new();
        vars.insert("url".to_string(), brief.url.clone());
        vars.insert("rationale".to_string(), brief.rationale.clone());

        let task = self
            .prompts
            .render_with_custom(&self.prompts.writer.user, &vars);

        let response = self.agent.run(&task).await?;

        info!(
            "Writer finished in {} iteration(s), {} tool call(s)",
            response.iterations,
            response.tool_calls.len()
        );

        Ok(ScriptDraft::new(response.content))
    }
}
