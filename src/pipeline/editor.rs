//! Editor stage.
//!
//! Rewrites the draft wholesale for grammar, pacing, length and format.
//! No tools: the editor only sees the draft and the research rationale.

use super::{date_stamped, ResearchBrief};
use crate::config::{Prompts, Settings};
use crate::error::{KladdError, Result};
use crate::script::ScriptDraft;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Stage 3: draft -> final script.
pub struct ScriptEditor {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl ScriptEditor {
    /// Create the editor stage.
    pub fn new(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        settings: &Settings,
        prompts: Prompts,
    ) -> Self {
        Self {
            client,
            model: settings.models.editor.clone(),
            temperature: settings.models.temperature,
            prompts,
        }
    }

    /// Rewrite the draft into its final form.
    #[instrument(skip(self, brief, draft))]
    pub async fn run(&self, brief: &ResearchBrief, draft: &ScriptDraft) -> Result<ScriptDraft> {
        let system = date_stamped(
            &self
                .prompts
                .render_with_custom(&self.prompts.editor.system, &HashMap::new()),
        );

        let mut vars = HashMap::new();
        vars.insert("rationale".to_string(), brief.rationale.clone());
        vars.insert("draft".to_string(), draft.text().to_string());

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.editor.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| KladdError::Pipeline(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| KladdError::Pipeline(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| KladdError::Pipeline(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| KladdError::OpenAI(format!("Editor API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| KladdError::Pipeline("Editor returned an empty script".to_string()))?
            .clone();

        info!("Editor produced final script ({} chars)", content.len());

        Ok(ScriptDraft::new(content))
    }
}
