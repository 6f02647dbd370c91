//! Tool definitions and implementations for the stage agents.

use crate::error::{KladdError, Result};
use crate::scrape::PageReader;
use crate::search::SearchProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search the web for wiki pages.
    WebSearch {
        query: String,
        #[serde(default = "default_num_results")]
        num_results: usize,
    },

    /// Fetch a web page and return its text content.
    ReadWebsite { url: String },
}

fn default_num_results() -> usize {
    5
}

/// Which tools a stage is allowed to use.
///
/// The researcher can only search; the writer can only read pages. This
/// keeps each stage's contract narrow: one produces a URL, the other
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolSet {
    /// web_search only.
    Research,
    /// read_website only.
    Write,
}

impl ToolSet {
    /// Check whether a tool call is permitted for this set.
    pub fn allows(&self, tool: &ToolCall) -> bool {
        matches!(
            (self, tool),
            (ToolSet::Research, ToolCall::WebSearch { .. })
                | (ToolSet::Write, ToolCall::ReadWebsite { .. })
        )
    }
}

/// Tool execution context with access to the search and scrape providers.
pub struct ToolContext {
    pub search: Arc<dyn SearchProvider>,
    pub reader: Arc<dyn PageReader>,
    max_search_results: usize,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(
        search: Arc<dyn SearchProvider>,
        reader: Arc<dyn PageReader>,
        max_search_results: usize,
    ) -> Self {
        Self {
            search,
            reader,
            max_search_results,
        }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::WebSearch { query, num_results } => {
                self.execute_web_search(query, *num_results).await
            }
            ToolCall::ReadWebsite { url } => self.execute_read_website(url).await,
        }
    }

    async fn execute_web_search(&self, query: &str, num_results: usize) -> Result<String> {
        let limit = num_results.min(self.max_search_results).max(1);
        let hits = self.search.search(query, limit).await?;

        if hits.is_empty() {
            return Ok("No results found for this query.".to_string());
        }

        let formatted = hits
            .iter()
            .enumerate()
            .map(|(i, hit)| format!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.url, hit.snippet))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!("Found {} results:\n\n{}", hits.len(), formatted))
    }

    async fn execute_read_website(&self, url: &str) -> Result<String> {
        let page = self.reader.read(url).await?;

        let mut output = format!("Content of {}:\n\n{}", page.url, page.text);
        if page.truncated {
            output.push_str("\n\n[Content truncated]");
        }

        Ok(output)
    }
}

/// Get OpenAI function/tool definitions for the given tool set.
pub fn tool_definitions(set: ToolSet) -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    match set {
        ToolSet::Research => vec![ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "web_search".to_string(),
                description: Some(
                    "Search the web for wiki pages. Use targeted queries like \
                    'site:<wiki domain> <character name>' to find one specific page."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        },
                        "num_results": {
                            "type": "integer",
                            "description": "Maximum number of results (default: 5)",
                            "default": 5
                        }
                    },
                    "required": ["query"]
                })),
                strict: None,
            },
        }],
        ToolSet::Write => vec![ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "read_website".to_string(),
                description: Some(
                    "Fetch a web page and return its text content. Use this to read \
                    the wiki page from the research brief."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "The page URL to fetch"
                        }
                    },
                    "required": ["url"]
                })),
                strict: None,
            },
        }],
    }
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| KladdError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "web_search" => {
            let query = args["query"]
                .as_str()
                .ok_or_else(|| KladdError::Agent("Missing 'query' argument".to_string()))?
                .to_string();
            let num_results = args["num_results"].as_u64().unwrap_or(5) as usize;
            Ok(ToolCall::WebSearch { query, num_results })
        }
        "read_website" => {
            let url = args["url"]
                .as_str()
                .ok_or_else(|| KladdError::Agent("Missing 'url' argument".to_string()))?
                .to_string();
            Ok(ToolCall::ReadWebsite { url })
        }
        _ => Err(KladdError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_search_tool() {
        let tool =
            parse_tool_call("web_search", r#"{"query": "site:onepiece.fandom.com Gedatsu"}"#)
                .unwrap();
        match tool {
            ToolCall::WebSearch { query, num_results } => {
                assert_eq!(query, "site:onepiece.fandom.com Gedatsu");
                assert_eq!(num_results, 5);
            }
            _ => panic!("Expected WebSearch tool"),
        }
    }

    #[test]
    fn test_parse_read_website_tool() {
        let tool = parse_tool_call(
            "read_website",
            r#"{"url": "https://onepiece.fandom.com/wiki/Gedatsu"}"#,
        )
        .unwrap();
        match tool {
            ToolCall::ReadWebsite { url } => {
                assert_eq!(url, "https://onepiece.fandom.com/wiki/Gedatsu");
            }
            _ => panic!("Expected ReadWebsite tool"),
        }
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("delete_everything", "{}").is_err());
    }

    #[test]
    fn test_toolset_gating() {
        let search = ToolCall::WebSearch {
            query: "x".to_string(),
            num_results: 5,
        };
        let read = ToolCall::ReadWebsite {
            url: "https://example.com".to_string(),
        };

        assert!(ToolSet::Research.allows(&search));
        assert!(!ToolSet::Research.allows(&read));
        assert!(ToolSet::Write.allows(&read));
        assert!(!ToolSet::Write.allows(&search));
    }

    #[test]
    fn test_tool_definitions_per_set() {
        let research = tool_definitions(ToolSet::Research);
        assert_eq!(research.len(), 1);
        assert_eq!(research[0].function.name, "web_search");

        let write = tool_definitions(ToolSet::Write);
        assert_eq!(write.len(), 1);
        assert_eq!(write[0].function.name, "read_website");
    }
}
