//! Sentiment service facade
//!
//! Ties the pipeline together for one analysis run: cache lookup, article
//! fetch, title deduplication, batch orchestration, response parsing, report
//! building, cache store. Callers only ever see an [`AnalysisReport`].

use std::sync::Arc;

use tracing::{info, instrument, warn};

use pulse_core::{dedup_by_title, AnalysisReport, AnalysisRequest, PulseResult};
use pulse_news::NewsApiClient;
use pulse_sentiment::{parse_response, SentimentModel};

use crate::analysis_cache::AnalysisCache;
use crate::orchestrator::{BatchOrchestrator, OrchestratorConfig};

/// End-to-end analysis service
pub struct SentimentService {
    news: NewsApiClient,
    orchestrator: BatchOrchestrator,
    cache: AnalysisCache,
}

impl SentimentService {
    /// Create a new service
    pub fn new(news: NewsApiClient, model: Arc<dyn SentimentModel>, cache: AnalysisCache) -> Self {
        Self {
            news,
            orchestrator: BatchOrchestrator::new(model),
            cache,
        }
    }

    /// Create a new service with custom orchestrator settings
    pub fn with_orchestrator_config(
        news: NewsApiClient,
        model: Arc<dyn SentimentModel>,
        cache: AnalysisCache,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            news,
            orchestrator: BatchOrchestrator::with_config(model, config),
            cache,
        }
    }

    /// Run one full analysis
    ///
    /// A run with no matching articles yields an empty report, not an
    /// error. Cache failures degrade to a cache miss.
    #[instrument(skip(self, request), fields(query = %request.query()))]
    pub async fn run(&self, request: &AnalysisRequest) -> PulseResult<AnalysisReport> {
        request.validate()?;

        if request.use_cache {
            match self.cache.get_report(request) {
                Ok(Some(report)) => {
                    info!("Serving cached report for '{}'", request.query());
                    return Ok(report);
                }
                Ok(None) => {}
                Err(e) => warn!("Cache lookup failed, running fresh analysis: {}", e),
            }
        }

        let articles = self
            .news
            .fetch_articles(
                &request.search_query(),
                request.start_date,
                request.end_date,
            )
            .await;
        let articles = dedup_by_title(articles);

        if articles.is_empty() {
            info!("No articles found for '{}'", request.query());
            return Ok(AnalysisReport::empty());
        }

        info!(
            "Analyzing {} deduplicated articles in batches of {}",
            articles.len(),
            request.batch_size
        );

        let raw_response = self
            .orchestrator
            .run(
                articles.clone(),
                &request.query(),
                request.include_sports,
                request.batch_size,
            )
            .await;

        let records = parse_response(&raw_response, &articles);
        info!(
            "Parsed {} sentiment records from {} chars of response",
            records.len(),
            raw_response.len()
        );

        let report = AnalysisReport::new(records, raw_response);

        if let Err(e) = self.cache.store_report(request, &report) {
            warn!("Failed to cache report: {}", e);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use pulse_sentiment::SentimentError;

    use super::*;

    /// Model that scores every article it sees a flat 0.5
    struct EchoModel;

    #[async_trait]
    impl SentimentModel for EchoModel {
        async fn generate(&self, prompt: &str) -> Result<String, SentimentError> {
            let sections: Vec<String> = prompt
                .split("Title: ")
                .skip(1)
                .filter_map(|s| s.lines().next())
                .map(|title| format!("Title: {title}\nSentiment: 0.5\nSummary: s."))
                .collect();
            Ok(sections.join("\n\n"))
        }
    }

    fn request(use_cache: bool) -> AnalysisRequest {
        AnalysisRequest {
            keywords: vec!["Tulane".to_string()],
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            include_sports: false,
            use_cache,
            batch_size: 10,
        }
    }

    fn temp_service(name: &str) -> SentimentService {
        let path = std::env::temp_dir()
            .join(format!("pulse-service-test-{name}-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        SentimentService::new(
            // Unreachable endpoint: the fetcher fails open to zero articles.
            NewsApiClient::new("test-key".to_string())
                .with_base_url("http://127.0.0.1:9"),
            Arc::new(EchoModel),
            AnalysisCache::new(&path).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_empty_fetch_yields_empty_report() {
        let service = temp_service("empty");
        let report = service.run(&request(false)).await.unwrap();

        assert!(report.records.is_empty());
        assert!(report.raw_response.is_empty());
        assert_eq!(report.summary.article_count, 0);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected() {
        let service = temp_service("invalid");
        let mut req = request(false);
        req.keywords = vec!["  ".to_string()];

        assert!(service.run(&req).await.is_err());
    }
}
