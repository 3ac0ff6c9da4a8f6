//! Label-based parsing of the model's free-text response
//!
//! The model is instructed to emit one section per article:
//!
//! ```text
//! Title: <headline>
//! Sentiment: <score>
//! Summary: <one line>
//! ```
//!
//! Real output drifts, so the parser is defensive: sections are cut on the
//! `Title:` marker, a section missing the `Sentiment:` marker or a numeric
//! score is dropped, and a title that matches no source article yields a
//! record without a URL. It never fails the run.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use pulse_core::{Article, SentimentRecord};

fn score_regex() -> &'static Regex {
    static SCORE: OnceLock<Regex> = OnceLock::new();
    SCORE.get_or_init(|| Regex::new(r"Sentiment:\s*(-?\d+\.?\d*)").expect("valid score regex"))
}

fn summary_regex() -> &'static Regex {
    static SUMMARY: OnceLock<Regex> = OnceLock::new();
    SUMMARY.get_or_init(|| Regex::new(r"Summary:\s*(.*)").expect("valid summary regex"))
}

/// Parse the joined response text into sentiment records
///
/// Records come out in response order. Titles are joined back to source
/// articles by exact string match, first match wins; unmatched titles keep
/// `url: None`.
pub fn parse_response(text: &str, articles: &[Article]) -> Vec<SentimentRecord> {
    let mut records = Vec::new();

    // Everything before the first marker is preamble (or a failure sentinel).
    for section in text.split("Title:").skip(1) {
        match parse_section(section, articles) {
            Some(record) => records.push(record),
            None => debug!(
                "Dropping malformed response section: {:?}",
                section.chars().take(60).collect::<String>()
            ),
        }
    }

    records
}

/// Parse one `Title:`-delimited section; `None` when malformed
fn parse_section(section: &str, articles: &[Article]) -> Option<SentimentRecord> {
    let sentiment_pos = section.find("Sentiment:")?;

    let title = section[..sentiment_pos].trim();
    if title.is_empty() {
        return None;
    }

    // Scores are defined on [-1, 1]; a model that drifts outside the range
    // is clamped rather than dropped.
    let sentiment: f64 = score_regex()
        .captures(&section[sentiment_pos..])?
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()?
        .clamp(-1.0, 1.0);

    let summary = summary_regex()
        .captures(section)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());

    let url = articles
        .iter()
        .find(|a| a.title == title)
        .map(|a| a.url.clone());

    Some(SentimentRecord {
        title: title.to_string(),
        sentiment,
        summary,
        url,
    })
}
