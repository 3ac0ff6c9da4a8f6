//! Service layer for Reputation Pulse
//!
//! Orchestrates the full pipeline: article fetch, deduplication,
//! concurrency-limited batch analysis, response parsing, report building,
//! and the explicit report cache at the orchestration boundary.

pub mod analysis_cache;
pub mod orchestrator;
pub mod sentiment_service;

pub use analysis_cache::{AnalysisCache, AnalysisCacheError};
pub use orchestrator::{partition, BatchOrchestrator, OrchestratorConfig};
pub use sentiment_service::SentimentService;
