//! Sentiment analysis endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use pulse_core::{AnalysisReport, AnalysisRequest, PulseError};

use crate::AppState;

/// Optional score-range filter for the returned record list
#[derive(Debug, Deserialize)]
struct ScoreFilter {
    /// Keep records with sentiment >= min_score
    min_score: Option<f64>,
    /// Keep records with sentiment <= max_score
    max_score: Option<f64>,
}

/// Run a sentiment analysis over news matching the request
///
/// The summary aggregates always cover the full run; the score filter only
/// narrows the record list.
async fn run_analysis(
    State(state): State<AppState>,
    Query(filter): Query<ScoreFilter>,
    Json(request): Json<AnalysisRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(service) = &state.sentiment_service else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Sentiment service not configured. Set NEWS_API_KEY and GEMINI_API_KEY."
            })),
        );
    };

    info!(
        "Analysis requested: query='{}', {} to {}",
        request.query(),
        request.start_date,
        request.end_date
    );

    match service.run(&request).await {
        Ok(report) => {
            let filtered = apply_filter(&report, &filter);
            (StatusCode::OK, Json(json!(filtered)))
        }
        Err(PulseError::Config(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

fn apply_filter(report: &AnalysisReport, filter: &ScoreFilter) -> AnalysisReport {
    if filter.min_score.is_none() && filter.max_score.is_none() {
        return report.clone();
    }

    let records = report.filter_records(filter.min_score, filter.max_score);
    AnalysisReport {
        records,
        raw_response: report.raw_response.clone(),
        summary: report.summary.clone(),
    }
}

/// Create analysis routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/analysis", post(run_analysis))
}

#[cfg(test)]
mod tests {
    use pulse_core::SentimentRecord;

    use super::*;

    fn record(title: &str, sentiment: f64) -> SentimentRecord {
        SentimentRecord {
            title: title.to_string(),
            sentiment,
            summary: None,
            url: None,
        }
    }

    #[test]
    fn test_filter_narrows_records_but_keeps_summary() {
        let report = AnalysisReport::new(
            vec![record("A", -0.8), record("B", 0.2), record("C", 0.9)],
            "raw".to_string(),
        );
        let filter = ScoreFilter {
            min_score: Some(0.0),
            max_score: None,
        };

        let filtered = apply_filter(&report, &filter);

        assert_eq!(filtered.records.len(), 2);
        assert_eq!(filtered.summary.article_count, 3);
        assert_eq!(filtered.raw_response, "raw");
    }

    #[test]
    fn test_no_filter_returns_full_report() {
        let report = AnalysisReport::new(vec![record("A", 0.1)], String::new());
        let filter = ScoreFilter {
            min_score: None,
            max_score: None,
        };

        assert_eq!(apply_filter(&report, &filter).records.len(), 1);
    }
}
