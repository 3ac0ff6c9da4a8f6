//! Sentiment analysis over a generative-language API
//!
//! This crate owns everything between a batch of articles and its parsed
//! sentiment records:
//! - prompt construction (instruction template + article block formatting)
//! - the [`SentimentModel`] trait and the Gemini implementation
//! - quota-aware retry with exponential backoff
//! - label-based parsing of the model's free-text response
//!
//! The model contract is deliberately unstructured text; the parser
//! compensates by tolerating partial and malformed output.

pub mod error;
pub mod gemini;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod retry;

pub use error::SentimentError;
pub use gemini::GeminiClient;
pub use model::SentimentModel;
pub use parser::parse_response;
pub use prompt::{build_prompt, format_articles};
pub use retry::{analyze_with_retry, RetryPolicy, ANALYSIS_FAILED_SENTINEL};
