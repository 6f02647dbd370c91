//! Topic researcher stage.
//!
//! Finds exactly one wiki page worth covering, via targeted web searches.

use super::date_stamped;
use crate::agent::{StageAgent, ToolContext, ToolSet};
use crate::config::{Prompts, Settings};
use crate::error::{KladdError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{info, instrument};

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>()\[\]"']+"#).expect("Invalid regex"));

/// Output of the research stage: one URL plus the agent's rationale.
#[derive(Debug, Clone)]
pub struct ResearchBrief {
    /// The selected wiki page URL.
    pub url: String,
    /// The researcher's full explanation of why the page is compelling.
    pub rationale: String,
    /// The user-supplied topic hint, if any.
    pub topic_hint: Option<String>,
}

/// Stage 1: pick one viral-worthy wiki page.
pub struct TopicResearcher {
    agent: StageAgent,
    prompts: Prompts,
    wiki_domain: String,
}

impl TopicResearcher {
    /// Create the researcher stage.
    pub fn new(
        client: async_openai::Client<async_openai::config::OpenAIConfig>,
        tools: ToolContext,
        settings: &Settings,
        prompts: Prompts,
    ) -> Self {
        let system = date_stamped(
            &prompts.render_with_custom(&prompts.researcher.system, &HashMap::new()),
        );

        let agent = StageAgent::new(
            client,
            tools,
            ToolSet::Research,
            &settings.models.researcher,
            &system,
        )
        .with_temperature(settings.models.temperature)
        .with_max_iterations(settings.pipeline.max_agent_iterations);

        Self {
            agent,
            prompts,
            wiki_domain: settings.content.wiki_domain.clone(),
        }
    }

    /// Run the research stage with an optional topic hint.
    #[instrument(skip(self))]
    pub async fn run(&self, topic: Option<&str>) -> Result<ResearchBrief> {
        let task = match topic {
            Some(topic) => {
                let mut vars = HashMap::new();
                vars.insert("topic".to_string(), topic.to_string());
                self.prompts
                    .render_with_custom(&self.prompts.researcher.user_with_topic, &vars)
            }
            None => self
                .prompts
                .render_with_custom(&self.prompts.researcher.user, &HashMap::new()),
        };

        let response = self.agent.run(&task).await?;

        info!(
            "Researcher finished in {} iteration(s), {} tool call(s)",
            response.iterations,
            response.tool_calls.len()
        );

        let url = extract_url(&response.content, &self.wiki_domain).ok_or_else(|| {
            KladdError::Pipeline(
                "Researcher did not return a usable wiki URL".to_string(),
            )
        })?;

        Ok(ResearchBrief {
            url,
            rationale: response.content,
            topic_hint: topic.map(|t| t.to_string()),
        })
    }
}

/// Pick one URL out of the researcher's free text.
///
/// Prefers the first URL on the configured wiki domain; falls back to the
/// first URL of any kind.
fn extract_url(text: &str, wiki_domain: &str) -> Option<String> {
    let mut first: Option<String> = None;
    for m in URL_REGEX.find_iter(text) {
        let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', '*']);
        if url.contains(wiki_domain) {
            return Some(url.to_string());
        }
        if first.is_none() {
            first = Some(url.to_string());
        }
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url_prefers_wiki_domain() {
        let text = "See https://example.com/other and \
                    https://onepiece.fandom.com/wiki/Gedatsu for details.";
        assert_eq!(
            extract_url(text, "onepiece.fandom.com"),
            Some("https://onepiece.fandom.com/wiki/Gedatsu".to_string())
        );
    }

    #[test]
    fn test_extract_url_falls_back_to_first() {
        let text = "The best source is https://example.com/page.";
        assert_eq!(
            extract_url(text, "onepiece.fandom.com"),
            Some("https://example.com/page".to_string())
        );
    }

    #[test]
    fn test_extract_url_strips_trailing_punctuation() {
        let text = "Read https://onepiece.fandom.com/wiki/Sanjuan_Wolf, then write.";
        assert_eq!(
            extract_url(text, "onepiece.fandom.com"),
            Some("https://onepiece.fandom.com/wiki/Sanjuan_Wolf".to_string())
        );
    }

    #[test]
    fn test_extract_url_handles_markdown_links() {
        let text = "Pick [Gedatsu](https://onepiece.fandom.com/wiki/Gedatsu) today.";
        assert_eq!(
            extract_url(text, "onepiece.fandom.com"),
            Some("https://onepiece.fandom.com/wiki/Gedatsu".to_string())
        );
    }

    #[test]
    fn test_extract_url_none_when_absent() {
        assert_eq!(extract_url("No links here.", "onepiece.fandom.com"), None);
    }
}
