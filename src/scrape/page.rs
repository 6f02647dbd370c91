//! HTTP page reader with HTML-to-text extraction.

use super::{PageContent, PageReader};
use crate::config::ScrapeSettings;
use crate::error::{KladdError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

/// Page reader that fetches over HTTP and strips markup.
pub struct HttpPageReader {
    client: reqwest::Client,
    max_chars: usize,
    script_style_regex: Regex,
    tag_regex: Regex,
    blank_lines_regex: Regex,
}

impl HttpPageReader {
    /// Create a new page reader from settings.
    pub fn new(settings: &ScrapeSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(&settings.user_agent)
            .build()
            .map_err(|e| KladdError::Scrape(format!("Failed to create HTTP client: {}", e)))?;

        // Drop script/style/noscript blocks wholesale, then remaining tags
        let script_style_regex =
            Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
                .expect("Invalid regex");
        let tag_regex = Regex::new(r"(?s)<[^>]+>").expect("Invalid regex");
        let blank_lines_regex = Regex::new(r"\n{3,}").expect("Invalid regex");

        Ok(Self {
            client,
            max_chars: settings.max_chars,
            script_style_regex,
            tag_regex,
            blank_lines_regex,
        })
    }

    /// Strip HTML down to readable text.
    fn html_to_text(&self, html: &str) -> String {
        let without_blocks = self.script_style_regex.replace_all(html, " ");
        // Turn block-level boundaries into newlines before stripping tags
        let with_breaks = without_blocks
            .replace("</p>", "\n")
            .replace("</li>", "\n")
            .replace("</tr>", "\n")
            .replace("<br>", "\n")
            .replace("<br/>", "\n")
            .replace("<br />", "\n");
        let without_tags = self.tag_regex.replace_all(&with_breaks, " ");

        let decoded = decode_entities(&without_tags);

        // Collapse horizontal whitespace per line, then runs of blank lines
        let collapsed = decoded
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n");

        self.blank_lines_regex
            .replace_all(&collapsed, "\n\n")
            .trim()
            .to_string()
    }
}

#[async_trait]
impl PageReader for HttpPageReader {
    async fn read(&self, url: &str) -> Result<PageContent> {
        let parsed = url::Url::parse(url)
            .map_err(|e| KladdError::InvalidInput(format!("Invalid URL '{}': {}", url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(KladdError::InvalidInput(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        debug!("Fetching page: {}", url);

        let response = self
            .client
            .get(parsed.as_str())
            .send()
            .await
            .map_err(|e| KladdError::Scrape(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(KladdError::Scrape(format!(
                "Page returned {}: {}",
                response.status(),
                url
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| KladdError::Scrape(format!("Failed to read body: {}", e)))?;

        let text = self.html_to_text(&html);
        let (text, truncated) = truncate_chars(&text, self.max_chars);

        debug!("Extracted {} chars (truncated: {})", text.len(), truncated);

        Ok(PageContent {
            url: url.to_string(),
            text,
            truncated,
        })
    }
}

/// Decode the handful of HTML entities that matter for wiki text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

/// Truncate to a character budget on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        (text.to_string(), false)
    } else {
        (text.chars().take(max_chars).collect(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> HttpPageReader {
        HttpPageReader::new(&ScrapeSettings::default()).unwrap()
    }

    #[test]
    fn test_html_to_text_strips_tags() {
        let html = "<html><body><h1>Gedatsu</h1><p>One of <b>Enel's</b> priests.</p></body></html>";
        let text = reader().html_to_text(html);
        assert!(text.contains("Gedatsu"));
        assert!(text.contains("One of Enel's priests."));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_html_to_text_drops_scripts_and_styles() {
        let html = "<style>.x{color:red}</style><script>alert('hi')</script><p>Visible</p>";
        let text = reader().html_to_text(html);
        assert_eq!(text, "Visible");
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        let html = "<p>Tom &amp; Jerry &quot;fight&quot;</p>";
        let text = reader().html_to_text(html);
        assert_eq!(text, "Tom & Jerry \"fight\"");
    }

    #[test]
    fn test_truncate_chars() {
        let (text, truncated) = truncate_chars("hello world", 5);
        assert_eq!(text, "hello");
        assert!(truncated);

        let (text, truncated) = truncate_chars("short", 10);
        assert_eq!(text, "short");
        assert!(!truncated);
    }

    #[tokio::test]
    async fn test_rejects_non_http_url() {
        let result = reader().read("ftp://example.com/file").await;
        assert!(matches!(result, Err(KladdError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_rejects_invalid_url() {
        let result = reader().read("not a url").await;
        assert!(matches!(result, Err(KladdError::InvalidInput(_))));
    }
}
