//! News clients for the sentiment pipeline
//!
//! This crate provides:
//! - NewsAPI search: keyword/date-range article search (primary source)
//! - Content enrichment: best-effort full-text scraping for articles whose
//!   snippet was truncated by the search API

pub mod enricher;
pub mod error;
pub mod newsapi;

pub use enricher::ContentEnricher;
pub use error::NewsError;
pub use newsapi::NewsApiClient;
