//! Best-effort full-text enrichment for truncated articles
//!
//! The search API cuts article bodies short and marks the cut with a
//! continuation sentinel. For those articles we fetch the article's own URL
//! and extract readable paragraph text. Every failure mode falls back to the
//! original (possibly truncated) content.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use pulse_core::Article;

use crate::error::NewsError;

/// Extracted body text shorter than this is treated as a failed extraction
/// (cookie walls, paywall stubs, error pages)
const MIN_EXTRACTED_LEN: usize = 200;

/// Best-effort article body scraper
pub struct ContentEnricher {
    client: Client,
}

impl Default for ContentEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentEnricher {
    /// Create a new enricher
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .user_agent("Mozilla/5.0 (compatible; ReputationPulse/0.1)")
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Enrich an article's content when it carries the truncation sentinel
    ///
    /// Never errors outward: on any failure the article is returned with its
    /// content unchanged. Intended to run once per unique title per run.
    #[instrument(skip(self, article), fields(url = %article.url))]
    pub async fn enrich(&self, mut article: Article) -> Article {
        if !article.is_truncated() {
            return article;
        }

        match self.fetch_full_text(&article.url).await {
            Ok(text) => {
                debug!("Enriched article with {} chars of body text", text.len());
                article.content = text;
            }
            Err(e) => {
                debug!("Enrichment failed, keeping truncated content: {}", e);
            }
        }

        article
    }

    /// Download the article page and extract readable body text
    async fn fetch_full_text(&self, url: &str) -> Result<String, NewsError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("article page returned {}", response.status()),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        let text = extract_readable_text(&html);
        if text.len() < MIN_EXTRACTED_LEN {
            return Err(NewsError::ScrapeFailed(format!(
                "extracted only {} chars",
                text.len()
            )));
        }

        Ok(text)
    }
}

/// Extract paragraph text from an HTML document, whitespace-normalised
///
/// Tolerates arbitrary markup; a non-article page simply yields little or no
/// text and the caller falls back to the snippet.
fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraphs = match Selector::parse("p") {
        Ok(sel) => sel,
        Err(_) => return String::new(),
    };

    let mut parts: Vec<String> = Vec::new();
    for element in document.select(&paragraphs) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let normalised = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !normalised.is_empty() {
            parts.push(normalised);
        }
    }

    parts.join("\n\n")
}
