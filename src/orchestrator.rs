//! Pipeline orchestrator for Kladd.
//!
//! Wires the three stages strictly in order: research -> write -> edit.
//! No branching, no looping, no retry above the stage level.

use crate::agent::ToolContext;
use crate::config::{ContentSettings, Prompts, Settings};
use crate::error::{KladdError, Result};
use crate::openai::create_client;
use crate::pipeline::{ResearchBrief, ScriptEditor, ScriptWriter, TopicResearcher};
use crate::scrape::{HttpPageReader, PageReader};
use crate::script::{LintFinding, ScriptDraft};
use crate::search::{SearchProvider, SerperSearch};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Kladd pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    search: Arc<dyn SearchProvider>,
    reader: Arc<dyn PageReader>,
}

impl Orchestrator {
    /// Create a new orchestrator with default providers.
    pub fn new(settings: Settings) -> Result<Self> {
        // Load prompts (with optional custom directory and variables)
        let mut prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        seed_content_vars(&mut prompts, &settings.content);

        let serper_key = settings.serper_api_key().ok_or_else(|| {
            KladdError::Config(
                "No Serper API key. Set SERPER_API_KEY or search.api_key in the config."
                    .to_string(),
            )
        })?;

        let search: Arc<dyn SearchProvider> = Arc::new(SerperSearch::new(
            &serper_key,
            &settings.search,
            &settings.pipeline,
        )?);
        let reader: Arc<dyn PageReader> = Arc::new(HttpPageReader::new(&settings.scrape)?);

        Ok(Self {
            settings,
            prompts,
            search,
            reader,
        })
    }

    /// Create an orchestrator with custom providers.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        search: Arc<dyn SearchProvider>,
        reader: Arc<dyn PageReader>,
    ) -> Self {
        let mut prompts = prompts;
        seed_content_vars(&mut prompts, &settings.content);

        Self {
            settings,
            prompts,
            search,
            reader,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the full pipeline: research a topic, draft a script, edit it.
    #[instrument(skip(self))]
    pub async fn generate(&self, topic: Option<&str>) -> Result<ScriptRun> {
        // Stage 1: research
        info!("Starting research stage");
        eprintln!("  Researching topic...");
        let brief = self.researcher().run(topic).await?;
        eprintln!("  Selected: {}", brief.url);

        // Stage 2: write
        info!("Starting writer stage for {}", brief.url);
        eprintln!("  Drafting script...");
        let draft = self.writer().run(&brief).await?;
        eprintln!("  Draft ready ({} words)", draft.word_count());

        // Stage 3: edit
        info!("Starting editor stage");
        eprintln!("  Editing draft...");
        let final_script = self.editor().run(&brief, &draft).await?;
        eprintln!("  Final script ready ({} words)", final_script.word_count());

        let findings = final_script.lint();

        Ok(ScriptRun {
            brief,
            draft,
            final_script,
            findings,
        })
    }

    /// Run only the research stage.
    #[instrument(skip(self))]
    pub async fn research(&self, topic: Option<&str>) -> Result<ResearchBrief> {
        self.researcher().run(topic).await
    }

    fn researcher(&self) -> TopicResearcher {
        TopicResearcher::new(
            create_client(self.settings.models.api_key.as_deref()),
            self.tool_context(),
            &self.settings,
            self.prompts.clone(),
        )
    }

    fn writer(&self) -> ScriptWriter {
        ScriptWriter::new(
            create_client(self.settings.models.api_key.as_deref()),
            self.tool_context(),
            &self.settings,
            self.prompts.clone(),
        )
    }

    fn editor(&self) -> ScriptEditor {
        ScriptEditor::new(
            create_client(self.settings.models.api_key.as_deref()),
            &self.settings,
            self.prompts.clone(),
        )
    }

    fn tool_context(&self) -> ToolContext {
        ToolContext::new(
            self.search.clone(),
            self.reader.clone(),
            self.settings.search.max_results,
        )
    }
}

/// Make subject and wiki domain available to every prompt template.
/// Config-supplied variables of the same name win.
fn seed_content_vars(prompts: &mut Prompts, content: &ContentSettings) {
    prompts
        .variables
        .entry("subject".to_string())
        .or_insert_with(|| content.subject.clone());
    prompts
        .variables
        .entry("wiki_domain".to_string())
        .or_insert_with(|| content.wiki_domain.clone());
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct ScriptRun {
    /// Output of the research stage.
    pub brief: ResearchBrief,
    /// The writer's draft, before editing.
    pub draft: ScriptDraft,
    /// The edited, final script.
    pub final_script: ScriptDraft,
    /// Advisory format findings on the final script.
    pub findings: Vec<LintFinding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ToolCall;
    use crate::scrape::PageContent;
    use crate::search::SearchHit;
    use async_trait::async_trait;

    struct StubSearch;

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<SearchHit>> {
            Ok(vec![SearchHit {
                title: format!("Result for {}", query),
                url: "https://onepiece.fandom.com/wiki/Gedatsu".to_string(),
                snippet: "One of Enel's priests.".to_string(),
            }])
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct StubReader;

    #[async_trait]
    impl PageReader for StubReader {
        async fn read(&self, url: &str) -> Result<PageContent> {
            Ok(PageContent {
                url: url.to_string(),
                text: "Gedatsu forgets to breathe.".to_string(),
                truncated: false,
            })
        }
    }

    fn stub_orchestrator() -> Orchestrator {
        Orchestrator::with_components(
            Settings::default(),
            Prompts::default(),
            Arc::new(StubSearch),
            Arc::new(StubReader),
        )
    }

    #[test]
    fn test_with_components_seeds_prompt_vars() {
        let orchestrator = stub_orchestrator();
        let rendered = orchestrator.prompts.render_with_custom(
            "site:{{wiki_domain}} about {{subject}}",
            &std::collections::HashMap::new(),
        );
        assert_eq!(rendered, "site:onepiece.fandom.com about One Piece");
        assert_eq!(orchestrator.settings().search.provider, "serper");
    }

    #[tokio::test]
    async fn test_with_components_routes_tools_to_injected_providers() {
        let orchestrator = stub_orchestrator();
        let tools = orchestrator.tool_context();

        let search_result = tools
            .execute(&ToolCall::WebSearch {
                query: "Gedatsu".to_string(),
                num_results: 3,
            })
            .await
            .unwrap();
        assert!(search_result.contains("Result for Gedatsu"));
        assert!(search_result.contains("https://onepiece.fandom.com/wiki/Gedatsu"));

        let page_result = tools
            .execute(&ToolCall::ReadWebsite {
                url: "https://onepiece.fandom.com/wiki/Gedatsu".to_string(),
            })
            .await
            .unwrap();
        assert!(page_result.contains("Gedatsu forgets to breathe."));
    }

    #[test]
    fn test_seed_content_vars_fills_defaults() {
        let mut prompts = Prompts::default();
        seed_content_vars(&mut prompts, &ContentSettings::default());

        let rendered = prompts.render_with_custom(
            "site:{{wiki_domain}} about {{subject}}",
            &std::collections::HashMap::new(),
        );
        assert_eq!(rendered, "site:onepiece.fandom.com about One Piece");
    }

    #[test]
    fn test_seed_content_vars_respects_config_override() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("subject".to_string(), "Naruto".to_string());
        seed_content_vars(&mut prompts, &ContentSettings::default());

        let rendered = prompts
            .render_with_custom("{{subject}}", &std::collections::HashMap::new());
        assert_eq!(rendered, "Naruto");
    }
}
