//! The text-in/text-out model seam

use async_trait::async_trait;

use crate::error::SentimentError;

/// A generative model treated as an opaque text-in/text-out service
///
/// The rest of the pipeline only ever sees this trait, so the provider (and
/// its error envelope quirks) can be swapped without touching the
/// orchestrator or the parser.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Send one prompt and return the raw response text
    async fn generate(&self, prompt: &str) -> Result<String, SentimentError>;
}
