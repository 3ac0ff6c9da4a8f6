//! Core types for Reputation Pulse
//!
//! This crate defines the shared data structures used across the pipeline:
//! articles, analysis requests, parsed sentiment records, and report
//! aggregates consumed by the dashboard.

pub mod article;
pub mod error;
pub mod report;
pub mod request;

pub use article::{dedup_by_title, Article, TRUNCATION_SENTINEL};
pub use error::{PulseError, PulseResult};
pub use report::{
    AnalysisReport, DistributionBucket, Overall, ReportSummary, SentimentRecord,
};
pub use request::AnalysisRequest;
