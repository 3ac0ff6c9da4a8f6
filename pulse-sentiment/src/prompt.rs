//! Prompt construction for batch sentiment analysis
//!
//! Two pure functions: [`format_articles`] renders a batch of articles into
//! the labeled text block the model receives, and [`build_prompt`] wraps it
//! in the instruction template. The template is the other half of the
//! parser's contract: `Title:` / `Sentiment:` / `Summary:` labels with
//! double-newline separation between article sections.

use pulse_core::Article;

/// Render a batch of articles as labeled lines, blank-line separated
///
/// Pure formatting only; any size limiting is the caller's responsibility.
pub fn format_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|a| {
            format!(
                "Title: {}\nDescription: {}\nContent: {}\nURL:{}",
                a.title, a.description, a.content, a.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the full prompt for one batch
///
/// The instruction template varies only in the sports wording: when sports
/// coverage is excluded, the model is told to skip sports articles entirely.
pub fn build_prompt(formatted_articles: &str, query: &str, include_sports: bool) -> String {
    let sports_clause = if include_sports {
        ""
    } else {
        "If you encounter any articles related to sports, please exclude them from the analysis. \
         Sports articles do not need to be summarized.\n"
    };

    format!(
        "Analyze the sentiment of the following news articles in relation to the keywords: '{query}'.\n\
         Assume all articles affect the institution's reputation positively, neutrally, or negatively.\n\
         Then, consider how the keywords also get discussed or portrayed in the article.\n\
         Provide an overall sentiment score (-1 to 1, where -1 is very negative, 0 is neutral, and 1 is \
         very positive; this is a continuous range).\n\
         Provide a summary of the sentiment and key reasons why the sentiment is positive, neutral, or \
         negative, specifically in relation to the keywords.\n\
         Make sure that you include the score from -1 to 1 in a continuous range (with decimal places) \
         and include the title, sentiment score, and summary for each article.\n\
         Separate article info by double newlines and always include 'Title:' before the headline, \
         'Sentiment:' before the score, and 'Summary:' before the summary.\n\
         Only judge the sentiment for each article in terms of how it mentions the keywords. \
         Do not analyze a title you have already analyzed. Max amount of titles should be 100.\n\
         {sports_clause}\
         If an article merely mentions a quote from a student, faculty, or staff member of the \
         institution, mention that in the summary.\n\n\
         {formatted_articles}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: format!("{title} description"),
            content: format!("{title} content"),
            url: format!("https://news.example/{title}"),
        }
    }

    #[test]
    fn test_format_articles_labeled_lines() {
        let block = format_articles(&[article("A"), article("B")]);
        let expected = "Title: A\nDescription: A description\nContent: A content\nURL:https://news.example/A\n\n\
                        Title: B\nDescription: B description\nContent: B content\nURL:https://news.example/B";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_format_articles_empty_batch() {
        assert_eq!(format_articles(&[]), "");
    }

    #[test]
    fn test_build_prompt_sports_variants() {
        let with_sports = build_prompt("Title: A", "Tulane", true);
        let without_sports = build_prompt("Title: A", "Tulane", false);

        assert!(!with_sports.contains("exclude them from the analysis"));
        assert!(without_sports.contains("exclude them from the analysis"));

        for prompt in [&with_sports, &without_sports] {
            assert!(prompt.contains("'Tulane'"));
            assert!(prompt.contains("'Title:'"));
            assert!(prompt.contains("'Sentiment:'"));
            assert!(prompt.contains("'Summary:'"));
            assert!(prompt.ends_with("Title: A"));
        }
    }
}
