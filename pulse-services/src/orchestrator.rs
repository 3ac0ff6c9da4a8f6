//! Concurrency-limited batch orchestration
//!
//! Partitions the deduplicated article set into fixed-size batches, runs
//! each batch through enrich → format → analyze under a semaphore admission
//! gate, and joins the per-batch responses in submission order. Completion
//! order never leaks into the output: results are collected positionally,
//! and a failed batch contributes its sentinel text without disturbing its
//! siblings.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use pulse_core::Article;
use pulse_news::ContentEnricher;
use pulse_sentiment::{
    analyze_with_retry, build_prompt, format_articles, RetryPolicy, SentimentModel,
    ANALYSIS_FAILED_SENTINEL,
};

/// Separator between per-batch response texts in the joined output
const BATCH_SEPARATOR: &str = "\n\n";

/// Concurrency settings for batch analysis
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Simultaneous in-flight batch analyses
    pub max_concurrent_batches: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_batches: 5,
        }
    }
}

/// Partition items into ordered batches of at most `batch_size`
///
/// Batches cover the input exactly, in original order; the last batch may
/// be short. A zero batch size is treated as one.
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let batch_size = batch_size.max(1);
    let mut batches: Vec<Vec<T>> = Vec::with_capacity(items.len().div_ceil(batch_size));
    let mut current = Vec::with_capacity(batch_size);

    for item in items {
        current.push(item);
        if current.len() == batch_size {
            batches.push(std::mem::replace(&mut current, Vec::with_capacity(batch_size)));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

/// Runs article batches through the analysis pipeline
pub struct BatchOrchestrator {
    enricher: Arc<ContentEnricher>,
    model: Arc<dyn SentimentModel>,
    retry_policy: RetryPolicy,
    config: OrchestratorConfig,
}

impl BatchOrchestrator {
    /// Create an orchestrator with default concurrency and retry settings
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self::with_config(model, OrchestratorConfig::default())
    }

    /// Create an orchestrator with custom concurrency settings
    pub fn with_config(model: Arc<dyn SentimentModel>, config: OrchestratorConfig) -> Self {
        Self {
            enricher: Arc::new(ContentEnricher::new()),
            model,
            retry_policy: RetryPolicy::default(),
            config,
        }
    }

    /// Analyze all articles and return the joined raw response
    ///
    /// The joined text holds batch responses in submission order, separated
    /// by blank lines, regardless of which batch finished first.
    pub async fn run(
        &self,
        articles: Vec<Article>,
        query: &str,
        include_sports: bool,
        batch_size: usize,
    ) -> String {
        let batches = partition(articles, batch_size);
        if batches.is_empty() {
            return String::new();
        }

        info!(
            "Dispatching {} batches ({} max concurrent)",
            batches.len(),
            self.config.max_concurrent_batches
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_batches));
        let mut handles = Vec::with_capacity(batches.len());

        for (index, batch) in batches.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let enricher = Arc::clone(&self.enricher);
            let model = Arc::clone(&self.model);
            let retry_policy = self.retry_policy.clone();
            let query = query.to_string();

            handles.push(tokio::spawn(async move {
                // Permit is held across the whole batch, backoff sleeps
                // included; an exhausted quota should not admit more work.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("batch semaphore closed");
                debug!("Batch {} admitted ({} articles)", index, batch.len());

                let mut enriched = Vec::with_capacity(batch.len());
                for article in batch {
                    enriched.push(enricher.enrich(article).await);
                }

                let prompt = build_prompt(&format_articles(&enriched), &query, include_sports);
                let response = analyze_with_retry(model.as_ref(), &prompt, &retry_policy).await;
                debug!("Batch {} completed ({} chars)", index, response.len());
                response
            }));
        }

        // Awaiting handles in spawn order makes the join deterministic.
        let mut results = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(text) => results.push(text),
                Err(e) => {
                    error!("Batch {} task failed: {}", index, e);
                    results.push(ANALYSIS_FAILED_SENTINEL.to_string());
                }
            }
        }

        results.join(BATCH_SEPARATOR)
    }
}
