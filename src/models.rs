//! Data models for scraped articles and the tabular records built from them.
//!
//! - [`RawArticle`]: one headline/body pair as matched on a category page
//! - [`NewsRecord`]: one row of the output corpus, base columns plus derived text
//! - [`Column`]: the fixed column vocabulary and the layouts the writer emits

use serde::{Deserialize, Serialize};

/// A headline/body pair matched on a category page.
///
/// Either side is `None` when its card was found but the text node inside it
/// was not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub category: String,
}

/// One row of the news corpus.
///
/// Field names follow the column headers of the written file. The derived
/// fields are filled in by later pipeline stages and are `None` until then.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsRecord {
    pub news_headline: String,
    pub news_article: String,
    pub news_category: String,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default, alias = "clean_text")]
    pub normalized_text: Option<String>,
    #[serde(default)]
    pub tagged_text: Option<String>,
}

impl NewsRecord {
    pub fn new(
        headline: impl Into<String>,
        article: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            news_headline: headline.into(),
            news_article: article.into(),
            news_category: category.into(),
            ..Self::default()
        }
    }
}

/// A column of the corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Headline,
    Article,
    Category,
    FullText,
    NormalizedText,
    TaggedText,
}

impl Column {
    pub const BASE: [Column; 3] = [Column::Headline, Column::Article, Column::Category];

    pub const DERIVED: [Column; 5] = [
        Column::Headline,
        Column::Article,
        Column::Category,
        Column::FullText,
        Column::NormalizedText,
    ];

    pub const TAGGED: [Column; 6] = [
        Column::Headline,
        Column::Article,
        Column::Category,
        Column::FullText,
        Column::NormalizedText,
        Column::TaggedText,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Headline => "news_headline",
            Column::Article => "news_article",
            Column::Category => "news_category",
            Column::FullText => "full_text",
            Column::NormalizedText => "normalized_text",
            Column::TaggedText => "tagged_text",
        }
    }

    /// The cell value of this column for `record`. Unset derived fields are empty.
    pub fn value<'a>(&self, record: &'a NewsRecord) -> &'a str {
        match self {
            Column::Headline => &record.news_headline,
            Column::Article => &record.news_article,
            Column::Category => &record.news_category,
            Column::FullText => record.full_text.as_deref().unwrap_or(""),
            Column::NormalizedText => record.normalized_text.as_deref().unwrap_or(""),
            Column::TaggedText => record.tagged_text.as_deref().unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_derived_fields() {
        let record = NewsRecord::new("Headline", "Body", "sports");
        assert_eq!(record.news_headline, "Headline");
        assert_eq!(record.news_category, "sports");
        assert!(record.full_text.is_none());
        assert!(record.normalized_text.is_none());
        assert!(record.tagged_text.is_none());
    }

    #[test]
    fn test_layout_headers() {
        let headers: Vec<&str> = Column::TAGGED.iter().map(Column::header).collect();
        assert_eq!(
            headers,
            vec![
                "news_headline",
                "news_article",
                "news_category",
                "full_text",
                "normalized_text",
                "tagged_text"
            ]
        );
        assert_eq!(&Column::TAGGED[..5], &Column::DERIVED[..]);
        assert_eq!(&Column::DERIVED[..3], &Column::BASE[..]);
    }

    #[test]
    fn test_column_value_of_unset_field_is_empty() {
        let mut record = NewsRecord::new("h", "b", "world");
        assert_eq!(Column::FullText.value(&record), "");
        record.full_text = Some("h. b".into());
        assert_eq!(Column::FullText.value(&record), "h. b");
        assert_eq!(Column::Category.value(&record), "world");
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = NewsRecord::new("h", "b", "world");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""news_category":"world""#));
        assert!(json.contains(r#""tagged_text":null"#));
    }
}
