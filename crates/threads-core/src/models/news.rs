//! News model - one entry in the cultural news feed.

use crate::fields::text_field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A news item, built-in or community-submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    /// Slug-like unique identifier
    pub id: String,

    pub title: String,

    /// Publication or submitting desk
    pub source: String,

    /// Publication date, `YYYY-MM-DD`
    pub date: String,

    pub summary: String,

    /// Link to the full story
    pub url: String,
}

impl NewsItem {
    /// Rebuild a persisted custom news item, filling in missing fields.
    pub(crate) fn from_document(object: &Map<String, Value>) -> Option<Self> {
        let id = text_field(object, "id")?;
        Some(Self {
            id,
            title: text_field(object, "title").unwrap_or_else(|| "Untitled news".to_string()),
            source: text_field(object, "source")
                .unwrap_or_else(|| "Community submission".to_string()),
            date: text_field(object, "date").unwrap_or_else(today),
            summary: text_field(object, "summary").unwrap_or_default(),
            url: text_field(object, "url").unwrap_or_else(|| DEFAULT_URL.to_string()),
        })
    }
}

/// Placeholder link for submissions without one.
pub const DEFAULT_URL: &str = "https://example.com";

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Input for a community-submitted news item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNews {
    pub title: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

impl NewNews {
    /// Create input with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Extract the submission fields from a JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            title: text_field(object, "title"),
            source: text_field(object, "source"),
            date: text_field(object, "date"),
            summary: text_field(object, "summary"),
            url: text_field(object, "url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn today_is_iso_date() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn from_document_fills_defaults() {
        let obj = json!({"id": "news-x"});
        let item = NewsItem::from_document(obj.as_object().unwrap()).unwrap();
        assert_eq!(item.title, "Untitled news");
        assert_eq!(item.source, "Community submission");
        assert_eq!(item.url, DEFAULT_URL);
        assert_eq!(item.date.len(), 10);
    }
}
