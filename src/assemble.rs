//! Turns extracted headline/body pairs into corpus records.

use crate::models::{NewsRecord, RawArticle};
use tracing::{debug, instrument};

/// Joins headline and body in `full_text`.
pub const SEPARATOR: &str = ". ";

/// Join a headline and its body into one text.
///
/// # Arguments
///
/// * `headline` - Headline text, possibly empty
/// * `body` - Body text, possibly empty
///
/// # Returns
///
/// `headline + ". " + body`. Empty parts are kept, so an empty headline
/// yields `". " + body`.
pub fn full_text(headline: &str, body: &str) -> String {
    let mut text = String::with_capacity(headline.len() + SEPARATOR.len() + body.len());
    text.push_str(headline);
    text.push_str(SEPARATOR);
    text.push_str(body);
    text
}

/// Build one record per article. A missing headline or body becomes an empty string.
#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn assemble(articles: Vec<RawArticle>) -> Vec<NewsRecord> {
    articles
        .into_iter()
        .map(|article| {
            let mut record = NewsRecord::new(
                article.headline.unwrap_or_default(),
                article.body.unwrap_or_default(),
                article.category,
            );
            record.full_text = Some(full_text(&record.news_headline, &record.news_article));
            record
        })
        .inspect(|record| debug!(category = %record.news_category, "Assembled record"))
        .collect()
}

/// Fill in `full_text` on records that lack it, e.g. ones loaded from a base-only file.
pub fn fill_full_text(records: &mut [NewsRecord]) {
    for record in records.iter_mut().filter(|r| r.full_text.is_none()) {
        record.full_text = Some(full_text(&record.news_headline, &record.news_article));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headline: Option<&str>, body: Option<&str>) -> RawArticle {
        RawArticle {
            headline: headline.map(str::to_string),
            body: body.map(str::to_string),
            category: "sports".to_string(),
        }
    }

    #[test]
    fn test_full_text_joins_with_separator() {
        assert_eq!(
            full_text("India win series", "India beat Australia by 5 wickets."),
            "India win series. India beat Australia by 5 wickets."
        );
    }

    #[test]
    fn test_assemble_keeps_order_and_category() {
        let records = assemble(vec![raw(Some("A"), Some("a")), raw(Some("B"), Some("b"))]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].full_text.as_deref(), Some("A. a"));
        assert_eq!(records[1].full_text.as_deref(), Some("B. b"));
        assert!(records.iter().all(|r| r.news_category == "sports"));
    }

    #[test]
    fn test_missing_headline_becomes_empty_not_none_literal() {
        let records = assemble(vec![raw(None, Some("Body text"))]);
        assert_eq!(records[0].news_headline, "");
        assert_eq!(records[0].full_text.as_deref(), Some(". Body text"));
    }

    #[test]
    fn test_fill_full_text_only_touches_missing() {
        let mut records = vec![NewsRecord::new("H", "B", "world"), NewsRecord::new("X", "Y", "world")];
        records[1].full_text = Some("kept".into());
        fill_full_text(&mut records);
        assert_eq!(records[0].full_text.as_deref(), Some("H. B"));
        assert_eq!(records[1].full_text.as_deref(), Some("kept"));
    }
}
