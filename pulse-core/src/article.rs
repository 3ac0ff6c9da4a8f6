//! Article data structures for the news sentiment pipeline

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Marker the news API inserts where an article body was cut short,
/// e.g. `"... [+1234 chars]"`.
pub const TRUNCATION_SENTINEL: &str = "[+";

/// A news article as it flows through one analysis run
///
/// Created by the article fetcher, optionally enriched in place with full
/// body text, and immutable thereafter. Within a run the title acts as the
/// unique key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article headline (unique within a run)
    pub title: String,
    /// Short description/snippet from the search API
    #[serde(default)]
    pub description: String,
    /// Body text; may be truncated by the upstream API
    #[serde(default)]
    pub content: String,
    /// Canonical article URL
    pub url: String,
}

impl Article {
    /// Whether the content field carries the upstream truncation sentinel
    pub fn is_truncated(&self) -> bool {
        self.content.contains(TRUNCATION_SENTINEL)
    }
}

/// Deduplicate articles by title, first occurrence wins
///
/// Title comparison is exact (case and whitespace sensitive). Order of the
/// surviving articles matches the input order.
pub fn dedup_by_title(articles: Vec<Article>) -> Vec<Article> {
    let mut seen: HashSet<String> = HashSet::with_capacity(articles.len());
    articles
        .into_iter()
        .filter(|article| seen.insert(article.title.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let articles = vec![
            article("A", "https://one.example/a"),
            article("B", "https://one.example/b"),
            article("A", "https://two.example/a"),
        ];

        let deduped = dedup_by_title(articles);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "A");
        assert_eq!(deduped[0].url, "https://one.example/a");
        assert_eq!(deduped[1].title, "B");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let articles = vec![
            article("A", "u1"),
            article("B", "u2"),
            article("A", "u3"),
            article("C", "u4"),
        ];

        let once = dedup_by_title(articles);
        let twice = dedup_by_title(once.clone());

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.url, b.url);
        }
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let articles = vec![article("Tulane wins", "u1"), article("tulane wins", "u2")];
        assert_eq!(dedup_by_title(articles).len(), 2);
    }

    #[test]
    fn test_truncation_sentinel_detection() {
        let mut a = article("A", "u");
        a.content = "The board voted on Tuesday to… [+2174 chars]".to_string();
        assert!(a.is_truncated());

        a.content = "Full text with no marker.".to_string();
        assert!(!a.is_truncated());
    }
}
