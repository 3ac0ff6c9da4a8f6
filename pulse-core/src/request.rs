//! Analysis request parameters
//!
//! Mirrors the dashboard inputs: keyword list, date range, and the toggles
//! for sports coverage and the report cache.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, PulseResult};

/// Default number of articles per model batch
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Query suffix used to steer the search API away from sports coverage.
/// Best-effort only; the model prompt filters again on the way through.
pub const SPORTS_EXCLUSION_TERMS: &str = " NOT sports NOT Football NOT basketball";

/// Parameters for one sentiment analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Keywords to search for, order-preserving (must be non-empty)
    pub keywords: Vec<String>,
    /// Start of the date range (inclusive)
    pub start_date: NaiveDate,
    /// End of the date range (inclusive)
    pub end_date: NaiveDate,
    /// Include sports coverage in the search and analysis
    #[serde(default)]
    pub include_sports: bool,
    /// Serve a cached report when one exists for these parameters
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Articles per model batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl AnalysisRequest {
    /// Validate the request shape
    ///
    /// Keywords must be non-empty and the batch size positive. The date
    /// range is deliberately not checked here; an inverted range simply
    /// yields zero articles from the search API.
    pub fn validate(&self) -> PulseResult<()> {
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(PulseError::config("at least one keyword is required"));
        }
        if self.batch_size == 0 {
            return Err(PulseError::config("batch_size must be at least 1"));
        }
        Ok(())
    }

    /// The keyword query: keywords joined with `+`
    pub fn query(&self) -> String {
        self.keywords.join("+")
    }

    /// The search query sent to the news API
    ///
    /// When sports coverage is excluded, exclusion terms are appended to the
    /// keyword query.
    pub fn search_query(&self) -> String {
        if self.include_sports {
            self.query()
        } else {
            format!("{}{}", self.query(), SPORTS_EXCLUSION_TERMS)
        }
    }

    /// Canonical encoding of the parameters that determine the result
    ///
    /// Used as cache key material; deliberately excludes `use_cache`.
    pub fn canonical_string(&self) -> String {
        format!(
            "q={}|from={}|to={}|sports={}|batch={}",
            self.query(),
            self.start_date,
            self.end_date,
            self.include_sports,
            self.batch_size
        )
    }
}
