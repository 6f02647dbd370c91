//! Serper (google.serper.dev) search provider.

use super::{SearchHit, SearchProvider};
use crate::config::{PipelineSettings, SearchSettings};
use crate::error::{KladdError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Web search backed by the Serper API.
pub struct SerperSearch {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    max_retries: usize,
    retry_backoff: Duration,
}

impl SerperSearch {
    /// Create a new Serper client from settings.
    pub fn new(
        api_key: &str,
        search: &SearchSettings,
        pipeline: &PipelineSettings,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(search.timeout_seconds))
            .build()
            .map_err(|e| KladdError::Search(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: search.endpoint.clone(),
            max_retries: pipeline.search_retries,
            retry_backoff: Duration::from_millis(pipeline.retry_backoff_ms),
        })
    }

    /// Issue a single search request without retries.
    async fn search_once(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let body = serde_json::json!({
            "q": query,
            "num": max_results,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| KladdError::Search(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(KladdError::Search(format!(
                "Serper returned {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| KladdError::Search(format!("Invalid response body: {}", e)))?;

        Ok(parse_organic_results(&json, max_results))
    }
}

#[async_trait]
impl SearchProvider for SerperSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        debug!("Searching: {}", query);

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = self.retry_backoff * attempt as u32;
                warn!("Search attempt {} failed, retrying in {:?}", attempt, backoff);
                tokio::time::sleep(backoff).await;
            }

            match self.search_once(query, max_results).await {
                Ok(hits) => {
                    debug!("Search returned {} hits", hits.len());
                    return Ok(hits);
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err
            .unwrap_or_else(|| KladdError::Search("Search failed with no attempts".to_string())))
    }

    fn name(&self) -> &str {
        "serper"
    }
}

/// Extract organic results from a Serper response body.
fn parse_organic_results(json: &serde_json::Value, max_results: usize) -> Vec<SearchHit> {
    let Some(organic) = json["organic"].as_array() else {
        return Vec::new();
    };

    organic
        .iter()
        .filter_map(|entry| {
            let url = entry["link"].as_str()?.to_string();
            let title = entry["title"].as_str().unwrap_or("Untitled").to_string();
            let snippet = entry["snippet"].as_str().unwrap_or_default().to_string();
            Some(SearchHit {
                title,
                url,
                snippet,
            })
        })
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_organic_results() {
        let json = serde_json::json!({
            "organic": [
                {
                    "title": "Gedatsu | One Piece Wiki",
                    "link": "https://onepiece.fandom.com/wiki/Gedatsu",
                    "snippet": "Gedatsu is one of Enel's priests."
                },
                {
                    "title": "No link here"
                },
                {
                    "title": "Sanjuan Wolf | One Piece Wiki",
                    "link": "https://onepiece.fandom.com/wiki/Sanjuan_Wolf",
                    "snippet": "The largest known giant."
                }
            ]
        });

        let hits = parse_organic_results(&json, 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://onepiece.fandom.com/wiki/Gedatsu");
        assert_eq!(hits[1].title, "Sanjuan Wolf | One Piece Wiki");
    }

    #[test]
    fn test_parse_respects_max_results() {
        let json = serde_json::json!({
            "organic": [
                {"title": "a", "link": "https://a.example", "snippet": ""},
                {"title": "b", "link": "https://b.example", "snippet": ""},
                {"title": "c", "link": "https://c.example", "snippet": ""}
            ]
        });

        let hits = parse_organic_results(&json, 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_parse_missing_organic_section() {
        let json = serde_json::json!({"searchParameters": {"q": "x"}});
        assert!(parse_organic_results(&json, 5).is_empty());
    }
}
