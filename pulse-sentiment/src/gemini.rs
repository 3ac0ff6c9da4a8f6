//! Gemini generateContent client
//!
//! Thin REST client for the Google generative-language API. Its one job
//! beyond the happy path is classifying failures for the retry policy:
//! quota exhaustion (with the provider's suggested wait), transient
//! connection errors, and everything else.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::SentimentError;
use crate::model::SentimentModel;

/// Default model identifier
const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: String) -> Result<Self, SentimentError> {
        if api_key.is_empty() {
            return Err(SentimentError::Config("GEMINI_API_KEY is empty".into()));
        }
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Use a different model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Override the endpoint base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Classify an error response body, preferring the quota variant
    fn classify_error(status: StatusCode, body: &str) -> SentimentError {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let error_status = parsed
            .as_ref()
            .and_then(|v| v["error"]["status"].as_str())
            .unwrap_or_default()
            .to_string();

        if status == StatusCode::TOO_MANY_REQUESTS || error_status == "RESOURCE_EXHAUSTED" {
            return SentimentError::QuotaExhausted {
                retry_after: parsed.as_ref().and_then(parse_retry_delay),
            };
        }

        let message = parsed
            .as_ref()
            .and_then(|v| v["error"]["message"].as_str())
            .unwrap_or(body)
            .to_string();
        SentimentError::Api(format!("Gemini returned {status}: {message}"))
    }
}

#[async_trait]
impl SentimentModel for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, SentimentError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SentimentError::Transient(e.to_string())
                } else {
                    SentimentError::Api(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_error(status, &body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Parse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(SentimentError::Api("no content in Gemini response".into()));
        }

        debug!("Gemini returned {} chars", text.len());
        Ok(text)
    }
}

/// Pull the suggested retry delay out of a quota error body
///
/// The provider attaches a `google.rpc.RetryInfo` detail whose `retryDelay`
/// is a duration string such as `"21s"` or `"12.5s"`.
fn parse_retry_delay(body: &serde_json::Value) -> Option<Duration> {
    let details = body["error"]["details"].as_array()?;
    for detail in details {
        if let Some(delay) = detail["retryDelay"].as_str() {
            let secs: f64 = delay.trim_end_matches('s').parse().ok()?;
            return Some(Duration::from_secs_f64(secs));
        }
    }
    None
}
