//! Parsed sentiment records and dashboard report aggregates

use serde::{Deserialize, Serialize};

/// Average-sentiment threshold above which a run reads as positive
/// (and below whose negation it reads as negative)
const OVERALL_THRESHOLD: f64 = 0.1;

/// Number of histogram buckets across the [-1, 1] score range
const DISTRIBUTION_BUCKETS: usize = 8;

/// One article's parsed analysis result
///
/// Produced only by the response parser; record order follows the model
/// response, not the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Title echoed by the model
    pub title: String,
    /// Continuous sentiment score in [-1.0, 1.0]
    pub sentiment: f64,
    /// One-line summary, when the model provided one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Source article URL; absent when the echoed title matched no article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Overall sentiment classification for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Positive,
    Neutral,
    Negative,
}

impl Overall {
    fn from_average(avg: Option<f64>) -> Self {
        match avg {
            Some(a) if a >= OVERALL_THRESHOLD => Overall::Positive,
            Some(a) if a <= -OVERALL_THRESHOLD => Overall::Negative,
            _ => Overall::Neutral,
        }
    }
}

/// One bar of the score-distribution chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// Inclusive lower bound of the bucket
    pub from: f64,
    /// Exclusive upper bound (inclusive for the last bucket)
    pub to: f64,
    /// Number of records whose score falls in the bucket
    pub count: usize,
}

/// Aggregates rendered at the top of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Mean sentiment across records, absent when no records were parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_sentiment: Option<f64>,
    /// Number of parsed records
    pub article_count: usize,
    /// Positive / neutral / negative classification of the average
    pub overall: Overall,
    /// Histogram of scores backing the bar chart
    pub distribution: Vec<DistributionBucket>,
}

impl ReportSummary {
    /// Compute aggregates from parsed records
    pub fn from_records(records: &[SentimentRecord]) -> Self {
        let average_sentiment = if records.is_empty() {
            None
        } else {
            Some(records.iter().map(|r| r.sentiment).sum::<f64>() / records.len() as f64)
        };

        let width = 2.0 / DISTRIBUTION_BUCKETS as f64;
        let mut distribution: Vec<DistributionBucket> = (0..DISTRIBUTION_BUCKETS)
            .map(|i| DistributionBucket {
                from: -1.0 + i as f64 * width,
                to: -1.0 + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for record in records {
            let clamped = record.sentiment.clamp(-1.0, 1.0);
            let mut idx = ((clamped + 1.0) / width) as usize;
            if idx >= DISTRIBUTION_BUCKETS {
                idx = DISTRIBUTION_BUCKETS - 1; // score of exactly 1.0
            }
            distribution[idx].count += 1;
        }

        Self {
            average_sentiment,
            article_count: records.len(),
            overall: Overall::from_average(average_sentiment),
            distribution,
        }
    }
}

/// Full payload served to the dashboard for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Parsed records in response order
    pub records: Vec<SentimentRecord>,
    /// The joined raw model response the records were parsed from
    pub raw_response: String,
    /// Aggregates for the summary header and bar chart
    pub summary: ReportSummary,
}

impl AnalysisReport {
    /// Build a report from parsed records and the raw joined response
    pub fn new(records: Vec<SentimentRecord>, raw_response: String) -> Self {
        let summary = ReportSummary::from_records(&records);
        Self {
            records,
            raw_response,
            summary,
        }
    }

    /// Empty report for runs that found no articles
    pub fn empty() -> Self {
        Self::new(Vec::new(), String::new())
    }

    /// Records whose score falls within `[min, max]` (either bound optional)
    ///
    /// Record order is preserved.
    pub fn filter_records(&self, min: Option<f64>, max: Option<f64>) -> Vec<SentimentRecord> {
        self.records
            .iter()
            .filter(|r| min.map_or(true, |m| r.sentiment >= m))
            .filter(|r| max.map_or(true, |m| r.sentiment <= m))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
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
    fn test_summary_average_and_overall() {
        let records = vec![record("A", 0.5), record("B", 0.3), record("C", 0.1)];
        let summary = ReportSummary::from_records(&records);

        let avg = summary.average_sentiment.unwrap();
        assert!((avg - 0.3).abs() < 1e-9);
        assert_eq!(summary.overall, Overall::Positive);
        assert_eq!(summary.article_count, 3);
    }

    #[test]
    fn test_summary_neutral_band() {
        let records = vec![record("A", 0.05), record("B", -0.05)];
        let summary = ReportSummary::from_records(&records);
        assert_eq!(summary.overall, Overall::Neutral);

        let records = vec![record("A", -0.5), record("B", -0.3)];
        let summary = ReportSummary::from_records(&records);
        assert_eq!(summary.overall, Overall::Negative);
    }

    #[test]
    fn test_summary_empty_records() {
        let summary = ReportSummary::from_records(&[]);
        assert!(summary.average_sentiment.is_none());
        assert_eq!(summary.overall, Overall::Neutral);
        assert_eq!(summary.article_count, 0);
    }

    #[test]
    fn test_distribution_covers_extremes() {
        let records = vec![record("lo", -1.0), record("hi", 1.0), record("mid", 0.0)];
        let summary = ReportSummary::from_records(&records);

        let total: usize = summary.distribution.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
        assert_eq!(summary.distribution.first().unwrap().count, 1);
        assert_eq!(summary.distribution.last().unwrap().count, 1);
    }

    #[test]
    fn test_filter_records_by_score_range() {
        let report = AnalysisReport::new(
            vec![record("A", -0.7), record("B", 0.0), record("C", 0.8)],
            String::new(),
        );

        let filtered = report.filter_records(Some(-0.1), Some(0.5));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "B");

        let unfiltered = report.filter_records(None, None);
        assert_eq!(unfiltered.len(), 3);
    }
}
