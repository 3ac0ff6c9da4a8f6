//! NewsAPI client for keyword article search
//!
//! Queries the NewsAPI `everything` endpoint with a keyword query and date
//! range. Fails open: any upstream problem yields an empty article list so
//! the rest of the run can proceed.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use pulse_core::Article;

use crate::error::NewsError;

/// NewsAPI search client
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Article payload as returned by NewsAPI (fields may be null)
#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
}

/// Top-level NewsAPI search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .user_agent("Mozilla/5.0 (compatible; ReputationPulse/0.1)")
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: "https://newsapi.org".to_string(),
        }
    }

    /// Override the endpoint base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for articles matching the query within the date range
    ///
    /// Returns an empty list on any upstream failure; a missing day of news
    /// is preferable to a failed dashboard.
    #[instrument(skip(self))]
    pub async fn fetch_articles(
        &self,
        search_query: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<Article> {
        match self.try_fetch(search_query, from, to).await {
            Ok(articles) => {
                info!(
                    "NewsAPI returned {} articles for query '{}'",
                    articles.len(),
                    search_query
                );
                articles
            }
            Err(e) => {
                warn!("NewsAPI search failed for '{}': {}", search_query, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(
        &self,
        search_query: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Article>, NewsError> {
        let url = format!(
            "{}/v2/everything?q={}&from={}&to={}&sortBy=popularity&apiKey={}",
            self.base_url,
            urlencoding::encode(search_query),
            from,
            to,
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        Ok(search
            .articles
            .into_iter()
            .filter_map(into_article)
            .collect())
    }
}

/// Convert a raw payload into an [`Article`], dropping entries without a
/// usable title or URL
fn into_article(raw: RawArticle) -> Option<Article> {
    let title = raw.title.filter(|t| !t.trim().is_empty())?;
    let url = raw.url.filter(|u| !u.trim().is_empty())?;
    Some(Article {
        title,
        description: raw.description.unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "title": "Tulane opens new research center",
                    "description": "A new center focused on river science.",
                    "content": "The university announced… [+1204 chars]",
                    "url": "https://news.example/center"
                },
                {
                    "title": null,
                    "description": "orphan entry",
                    "content": null,
                    "url": "https://news.example/orphan"
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let articles: Vec<Article> = parsed.articles.into_iter().filter_map(into_article).collect();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Tulane opens new research center");
        assert!(articles[0].is_truncated());
    }

    #[test]
    fn test_parse_response_without_articles_field() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(parsed.articles.is_empty());
    }

    #[test]
    fn test_into_article_requires_title_and_url() {
        let raw = RawArticle {
            title: Some("  ".to_string()),
            description: None,
            content: None,
            url: Some("https://news.example/a".to_string()),
        };
        assert!(into_article(raw).is_none());

        let raw = RawArticle {
            title: Some("Headline".to_string()),
            description: None,
            content: None,
            url: None,
        };
        assert!(into_article(raw).is_none());
    }
}
