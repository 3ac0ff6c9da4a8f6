//! Error types for the sentiment module

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by a sentiment model call
///
/// The retry policy treats the variants differently: quota exhaustion waits
/// out the provider's hint, transient failures back off exponentially, and
/// everything else aborts the batch.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Provider-side rate limit; the caller must wait before retrying
    #[error("Quota exhausted (retry after {retry_after:?})")]
    QuotaExhausted {
        /// Provider-suggested wait, when the error carried one
        retry_after: Option<Duration>,
    },

    /// Connection-level failure that is worth retrying
    #[error("Transient error: {0}")]
    Transient(String),

    /// Any other provider error; not retried
    #[error("API error: {0}")]
    Api(String),

    /// Failed to parse the provider response envelope
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
