//! Lesson model - one card in the lesson catalog.

use crate::fields::text_field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A lesson in the catalog, built-in or community-submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LessonItem {
    /// Slug-like unique identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// One-paragraph teaser
    pub summary: String,

    /// Duration and level, e.g. "5 minutes · Beginner"
    pub meta: String,
}

impl LessonItem {
    /// Create a lesson from its parts.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        meta: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            meta: meta.into(),
        }
    }

    /// Rebuild a persisted custom lesson, filling in missing fields.
    ///
    /// Returns `None` for entries without an id; those can never be toggled.
    pub(crate) fn from_document(object: &Map<String, Value>) -> Option<Self> {
        let id = text_field(object, "id")?;
        Some(Self {
            id,
            title: text_field(object, "title").unwrap_or_else(|| "Untitled lesson".to_string()),
            summary: text_field(object, "summary").unwrap_or_default(),
            meta: text_field(object, "meta").unwrap_or_else(|| "Custom".to_string()),
        })
    }
}

/// Input for a community-submitted lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLesson {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub duration: Option<String>,
    pub level: Option<String>,
}

impl NewLesson {
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
            summary: text_field(object, "summary"),
            duration: text_field(object, "duration"),
            level: text_field(object, "level"),
        }
    }
}
