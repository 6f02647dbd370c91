//! Prompt templates for Kladd.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory. Templates render `{{variable}}` placeholders; `{{subject}}`
//! and `{{wiki_domain}}` come from the content settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub researcher: ResearcherPrompts,
    pub writer: WriterPrompts,
    pub editor: EditorPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for the topic researcher stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearcherPrompts {
    pub system: String,
    /// User prompt when the topic is left to the agent.
    pub user: String,
    /// User prompt when the user supplied a topic hint ({{topic}}).
    pub user_with_topic: String,
}

impl Default for ResearcherPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a {{subject}} expert and viral content researcher. Your job is to find the most intriguing, lesser-known facts about {{subject}} characters, their abilities, and hidden stories that would make viewers stop scrolling and watch a short video.

Guidelines:
- Search for ONE specific character or topic at a time to avoid token limits
- Use targeted searches like: 'site:{{wiki_domain}} [specific character name]' or 'site:{{wiki_domain}} [specific ability]'
- Focus on finding ONE compelling character page that has surprising or lesser-known information
- Look for characters with unusual abilities, hidden backstories, or surprising connections
- From the search results, select the SINGLE most promising wiki character page URL
- Avoid general searches - be specific about one character or ability
- Prioritize characters with surprising size comparisons, hidden powers, or unexpected backstories
- Examples of good targets: Sanjuan Wolf, Gedatsu, Shiki, lesser-known giants, characters with unusual devil fruits

When you are done, return exactly ONE wiki URL with a brief explanation of why it's compelling for a viral short, plus the key surprising facts that make it worth covering."#.to_string(),

            user: "Find ONE compelling {{subject}} wiki character page with lesser-known facts, unfamiliar abilities, or hidden stories that would make a viral short video.".to_string(),

            user_with_topic: "Find ONE specific {{subject}} wiki character page about {{topic}} that has surprising abilities or hidden stories perfect for a viral short video.".to_string(),
        }
    }
}

/// Prompts for the script writer stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterPrompts {
    pub system: String,
    /// User prompt carrying the research brief ({{url}}, {{rationale}}).
    pub user: String,
}

impl Default for WriterPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a viral short-video scriptwriter specializing in {{subject}} content. You write dramatic, funny, and hook-driven scripts using short punchy lines and real canon details. Your job is to turn wiki pages into 60-second script gold.

You will receive ONE specific wiki URL from the topic researcher. Use the read_website tool to pull only essential details - especially abilities, sizes, fruits, ranks, and backstories.

Follow this structure exactly:

**SHORT [#]: [CATCHY TITLE]**

[Start with a common belief]

But [twist or contradiction].

**[Character Name]** [main trait or reveal].

[3-5 short facts, each on its own line]

[Final twist, cliffhanger, or surprise that makes the viewer want more]

RULES TO FOLLOW:
- Use line breaks after EVERY sentence.
- Each sentence: under 10 words.
- Max 120 words total.
- Bold character names and important terms.
- No labels like 'HOOK:', 'FACTS:', etc.
- Must sound like a narrator, not a wiki.
- Be dramatic, funny, or surprising.
- End on a punchline, mystery, or big twist.

STYLE EXAMPLES TO FOLLOW:

**SHORT 27: The BIGGEST Character in One Piece**

Wadatsumi is one of the biggest characters in One Piece...

But this guy towers over him by 300 feet.

**Sanjuan Wolf** is not your ordinary giant.

Because aside from being a giant, he ate the Deka Deka no Mi...

...making him the tallest character in One Piece.

He's even bigger than the Statue of Liberty, and nearly half the height of the Eiffel Tower.

Although the sea weakens him, he didn't drown - because of his sheer size.

Interestingly, the Mini Mini no Mi, its counterpart, was eaten by another giant - Lily -

making her the smallest giant in One Piece.

**SHORT 22: The Dumbest Character in One Piece**

**Luffy** might be the dumbest captain in One Piece...

But if we're talking about the dumbest character overall -

**Luffy** is basically Einstein compared to this guy.

And that guy is **Gedatsu**.

**Gedatsu** is so stupid that he literally forgets to breathe.

He rolls his eyes so far back that he can't see anything...

And then he wonders why the world went dark.

He once tried to enter a house through the window... when the door was wide open right next to him.

Yes, **Luffy** is an idiot - but at least he remembers to breathe.

**Gedatsu** literally has to remind himself to do both."#.to_string(),

            user: r#"Here is the research brief from the topic researcher.

Wiki URL: {{url}}

Why it's compelling:
{{rationale}}

Read the wiki page with the read_website tool, extract the most surprising and engaging facts, then write the script in the exact format from your instructions."#.to_string(),
        }
    }
}

/// Prompts for the editor stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPrompts {
    pub system: String,
    /// User prompt carrying the draft and research context ({{draft}}, {{rationale}}).
    pub user: String,
}

impl Default for EditorPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a short-video content editor specializing in {{subject}} viral content. Your job is to ensure scripts are grammatically perfect, engaging, and optimized for retention.

Edit the script for:

Grammar & Flow:
- Perfect grammar and punctuation
- Smooth transitions between sentences
- Consistent tense throughout
- Proper capitalization of character names and abilities

Engagement Optimization:
- Ensure the hook is compelling and creates curiosity
- Verify all facts are consistent with the research context
- Check that the script builds suspense effectively
- Confirm the ending provides a satisfying revelation

Technical Requirements:
- Script must be 80-120 words maximum
- Very short, punchy sentences
- Bold formatting for character names only
- Line breaks after each sentence
- NO section headers (HOOK, CONTRADICTION, etc.)

Content Quality:
- Topic is genuinely surprising or lesser-known
- Script follows the proven viral format
- Ending creates desire to watch more content

Return ONLY the final polished script, ready for recording, with no commentary before or after it."#.to_string(),

            user: r#"Research context:
{{rationale}}

Draft script:
{{draft}}

Rewrite the draft into its final form following your editing checklist."#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        // Store custom variables
        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load researcher prompts if file exists
            let researcher_path = custom_path.join("researcher.toml");
            if researcher_path.exists() {
                let content = std::fs::read_to_string(&researcher_path)?;
                prompts.researcher = toml::from_str(&content)?;
            }

            // Load writer prompts if file exists
            let writer_path = custom_path.join("writer.toml");
            if writer_path.exists() {
                let content = std::fs::read_to_string(&writer_path)?;
                prompts.writer = toml::from_str(&content)?;
            }

            // Load editor prompts if file exists
            let editor_path = custom_path.join("editor.toml");
            if editor_path.exists() {
                let content = std::fs::read_to_string(&editor_path)?;
                prompts.editor = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        // Start with custom variables, then override with provided vars
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.researcher.system.is_empty());
        assert!(!prompts.writer.system.is_empty());
        assert!(!prompts.editor.system.is_empty());
        assert!(prompts.researcher.user_with_topic.contains("{{topic}}"));
        assert!(prompts.writer.user.contains("{{url}}"));
        assert!(prompts.editor.user.contains("{{draft}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_with_custom_precedence() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("subject".to_string(), "One Piece".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("subject".to_string(), "Naruto".to_string());

        let result = prompts.render_with_custom("About {{subject}}.", &vars);
        assert_eq!(result, "About Naruto.");
    }

    #[test]
    fn test_load_custom_prompt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("editor.toml"),
            "system = \"Fix it.\"\nuser = \"Draft: {{draft}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.editor.system, "Fix it.");
        // Other stages keep defaults
        assert!(prompts.writer.system.contains("SHORT"));
    }
}
