//! Quota-aware retry around a sentiment model call
//!
//! One batch analysis never fails loudly: after the retry budget is spent
//! (or on a non-retryable provider error) the caller receives a fixed
//! sentinel string in place of the analysis text, and the run carries on.

use std::time::Duration;

use tracing::{error, warn};

use crate::error::SentimentError;
use crate::model::SentimentModel;

/// Placeholder substituted for a batch's analysis when retries are exhausted
pub const ANALYSIS_FAILED_SENTINEL: &str = "[Sentiment analysis failed for this batch.]";

/// Retry budget and quota fallback for batch analysis
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first call
    pub max_attempts: u32,
    /// Wait applied on quota errors that carry no provider hint
    pub quota_fallback: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            quota_fallback: Duration::from_secs(60),
        }
    }
}

/// Run one batch analysis under the retry policy
///
/// - quota exhaustion: wait out the provider's suggested delay (fallback
///   60 s), then retry
/// - transient connection errors: exponential backoff, `2^attempt` seconds
///   plus a random jitter in [0, 1) s
/// - any other error: abort immediately
///
/// Always returns text; exhaustion and aborts yield
/// [`ANALYSIS_FAILED_SENTINEL`].
pub async fn analyze_with_retry<M>(model: &M, prompt: &str, policy: &RetryPolicy) -> String
where
    M: SentimentModel + ?Sized,
{
    for attempt in 0..policy.max_attempts {
        match model.generate(prompt).await {
            Ok(text) => return text,
            Err(SentimentError::QuotaExhausted { retry_after }) => {
                if attempt + 1 >= policy.max_attempts {
                    break;
                }
                let delay = retry_after.unwrap_or(policy.quota_fallback);
                warn!(
                    "Quota exhausted (attempt {}/{}), waiting {:?} before retry",
                    attempt + 1,
                    policy.max_attempts,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(SentimentError::Transient(e)) => {
                if attempt + 1 >= policy.max_attempts {
                    break;
                }
                let jitter: f64 = rand::random();
                let delay = Duration::from_secs_f64(2f64.powi(attempt as i32) + jitter);
                warn!(
                    "Transient error (attempt {}/{}): {}, retrying in {:?}",
                    attempt + 1,
                    policy.max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                error!("Batch analysis aborted: {}", e);
                return ANALYSIS_FAILED_SENTINEL.to_string();
            }
        }
    }

    error!(
        "Batch analysis failed after {} attempts",
        policy.max_attempts
    );
    ANALYSIS_FAILED_SENTINEL.to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Model that fails a fixed number of times before succeeding
    struct FlakyModel {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> SentimentError,
    }

    impl FlakyModel {
        fn failing_with(failures: u32, error: fn() -> SentimentError) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures,
                error,
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SentimentModel for FlakyModel {
        async fn generate(&self, _prompt: &str) -> Result<String, SentimentError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err((self.error)())
            } else {
                Ok("Title: A\nSentiment: 0.5".to_string())
            }
        }
    }

    fn quota_error() -> SentimentError {
        SentimentError::QuotaExhausted {
            retry_after: Some(Duration::from_secs(1)),
        }
    }

    fn transient_error() -> SentimentError {
        SentimentError::Transient("connection reset".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_error_on_every_attempt_yields_sentinel_after_five() {
        let model = FlakyModel::failing_with(u32::MAX, quota_error);
        let policy = RetryPolicy::default();

        let result = analyze_with_retry(&model, "prompt", &policy).await;

        assert_eq!(result, ANALYSIS_FAILED_SENTINEL);
        assert_eq!(model.call_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_quota_waits() {
        let model = FlakyModel::failing_with(2, quota_error);
        let policy = RetryPolicy::default();

        let result = analyze_with_retry(&model, "prompt", &policy).await;

        assert_eq!(result, "Title: A\nSentiment: 0.5");
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_backed_off_and_recovered() {
        let model = FlakyModel::failing_with(3, transient_error);
        let policy = RetryPolicy::default();

        let result = analyze_with_retry(&model, "prompt", &policy).await;

        assert_eq!(result, "Title: A\nSentiment: 0.5");
        assert_eq!(model.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_aborts_immediately() {
        let model =
            FlakyModel::failing_with(u32::MAX, || SentimentError::Api("bad request".into()));
        let policy = RetryPolicy::default();

        let result = analyze_with_retry(&model, "prompt", &policy).await;

        assert_eq!(result, ANALYSIS_FAILED_SENTINEL);
        assert_eq!(model.call_count(), 1);
    }
}
