//! Progress state - the single persisted document.
//!
//! Holds completion/read flags, the streak counter, earned badges, the
//! learner profile, and the community-submitted catalog entries. The state
//! is rebuilt from loosely-typed JSON on every load so that older or
//! hand-edited documents degrade field by field instead of failing.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::fields::string_list;
use crate::models::{LessonItem, NewsItem, ProfileInfo, ProfileUpdate};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;

/// Badge every learner starts with.
pub const FIRST_STEPS: &str = "First Steps";
/// Badge for completing every lesson in the catalog.
pub const LESSON_PATHFINDER: &str = "Lesson Pathfinder";
/// Badge for reading every news item in the catalog.
pub const NEWS_EXPLORER: &str = "News Explorer";

/// What a reset clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Clear progress, profile and custom catalog entries.
    #[default]
    Everything,
    /// Clear progress and profile; keep community-submitted entries.
    KeepCustomCatalog,
}

impl FromStr for ResetPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "everything" | "all" => Ok(Self::Everything),
            "keep-custom" | "progress" => Ok(Self::KeepCustomCatalog),
            other => Err(Error::validation(format!("unknown reset policy: {}", other))),
        }
    }
}

/// Persisted progress document.
///
/// Written with serde; read back only through [`ProgressState::from_document`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Completed lesson ids, in completion order
    pub completed_lessons: Vec<String>,

    /// Read news ids, in reading order
    pub read_news: Vec<String>,

    /// Lesson completions ever made, starting at 1
    pub streak: u64,

    /// Earned badges, in award order
    pub badges: Vec<String>,

    /// Community-submitted lessons, oldest first
    pub custom_lessons: Vec<LessonItem>,

    /// Community-submitted news, oldest first
    pub custom_news: Vec<NewsItem>,

    pub profile: ProfileInfo,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            completed_lessons: Vec::new(),
            read_news: Vec::new(),
            streak: 1,
            badges: vec![FIRST_STEPS.to_string()],
            custom_lessons: Vec::new(),
            custom_news: Vec::new(),
            profile: ProfileInfo::default(),
        }
    }
}

impl ProgressState {
    /// Rebuild state from a parsed document.
    ///
    /// Every field is read independently; a field of the wrong type falls
    /// back to its default. `readStories` is honoured when `readNews` is
    /// missing. Ids that no longer exist in the catalog are dropped.
    pub fn from_document(value: &Value) -> Self {
        let Some(doc) = value.as_object() else {
            return Self::default();
        };

        let custom_lessons = doc
            .get("customLessons")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(LessonItem::from_document)
                    .collect()
            })
            .unwrap_or_default();

        let custom_news = doc
            .get("customNews")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(NewsItem::from_document)
                    .collect()
            })
            .unwrap_or_default();

        let streak = doc
            .get("streak")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite())
            .map(|s| s.floor().max(1.0) as u64)
            .unwrap_or(1);

        let profile = doc
            .get("profile")
            .and_then(Value::as_object)
            .map(|p| ProfileInfo::from_update(&ProfileUpdate::from_object(p)))
            .unwrap_or_default();

        let mut state = Self {
            completed_lessons: string_list(doc, "completedLessons").unwrap_or_default(),
            read_news: string_list(doc, "readNews")
                .or_else(|| string_list(doc, "readStories"))
                .unwrap_or_default(),
            streak,
            badges: string_list(doc, "badges").unwrap_or_default(),
            custom_lessons,
            custom_news,
            profile,
        };
        state.normalize();
        state
    }

    /// Enforce the document invariants: unique custom ids, no stale or
    /// duplicate progress ids, unique badges led by [`FIRST_STEPS`].
    fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.custom_lessons.retain(|l| seen.insert(l.id.clone()));
        let mut seen = HashSet::new();
        self.custom_news.retain(|n| seen.insert(n.id.clone()));

        let catalog = Catalog::new(&self.custom_lessons, &self.custom_news);
        let lesson_ids: HashSet<&str> = catalog.lesson_ids().collect();
        let news_ids: HashSet<&str> = catalog.news_ids().collect();
        retain_known(&mut self.completed_lessons, &lesson_ids);
        retain_known(&mut self.read_news, &news_ids);

        let mut seen = HashSet::new();
        self.badges.retain(|b| !b.trim().is_empty() && seen.insert(b.clone()));
        if !self.has_badge(FIRST_STEPS) {
            self.badges.insert(0, FIRST_STEPS.to_string());
        }
    }

    /// Combined catalog for this document.
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.custom_lessons, &self.custom_news)
    }

    pub fn is_lesson_complete(&self, id: &str) -> bool {
        self.completed_lessons.iter().any(|c| c == id)
    }

    pub fn is_news_read(&self, id: &str) -> bool {
        self.read_news.iter().any(|r| r == id)
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.iter().any(|b| b == badge)
    }

    /// Flip a lesson between incomplete and complete.
    ///
    /// Completing bumps the streak; un-completing leaves it alone. Returns
    /// whether the lesson is now complete.
    pub fn toggle_lesson(&mut self, id: &str) -> Result<bool> {
        if !self.catalog().is_valid_lesson_id(id) {
            return Err(Error::not_found("Unknown lesson id"));
        }

        let complete = match self.completed_lessons.iter().position(|c| c == id) {
            Some(pos) => {
                self.completed_lessons.remove(pos);
                false
            }
            None => {
                self.completed_lessons.push(id.to_string());
                self.streak = self.streak.saturating_add(1);
                true
            }
        };

        let catalog = self.catalog();
        if catalog.lesson_ids().all(|l| self.is_lesson_complete(l)) {
            self.award(LESSON_PATHFINDER);
        }
        Ok(complete)
    }

    /// Flip a news item between unread and read. Returns whether it is now read.
    pub fn toggle_news(&mut self, id: &str) -> Result<bool> {
        if !self.catalog().is_valid_news_id(id) {
            return Err(Error::not_found("Unknown news id"));
        }

        let read = match self.read_news.iter().position(|r| r == id) {
            Some(pos) => {
                self.read_news.remove(pos);
                false
            }
            None => {
                self.read_news.push(id.to_string());
                true
            }
        };

        let catalog = self.catalog();
        if catalog.news_ids().all(|n| self.is_news_read(n)) {
            self.award(NEWS_EXPLORER);
        }
        Ok(read)
    }

    /// Add a badge once. Badges are never removed by toggles.
    fn award(&mut self, badge: &str) {
        if !self.has_badge(badge) {
            tracing::info!(badge, "badge awarded");
            self.badges.push(badge.to_string());
        }
    }

    /// Replace the profile wholesale.
    pub fn set_profile(&mut self, update: &ProfileUpdate) -> &ProfileInfo {
        self.profile = ProfileInfo::from_update(update);
        &self.profile
    }

    /// Return to a fresh document according to `policy`.
    pub fn reset(&mut self, policy: ResetPolicy) {
        let (custom_lessons, custom_news) = match policy {
            ResetPolicy::Everything => (Vec::new(), Vec::new()),
            ResetPolicy::KeepCustomCatalog => (
                std::mem::take(&mut self.custom_lessons),
                std::mem::take(&mut self.custom_news),
            ),
        };
        *self = Self {
            custom_lessons,
            custom_news,
            ..Self::default()
        };
    }
}

fn retain_known(ids: &mut Vec<String>, known: &HashSet<&str>) {
    let mut seen = HashSet::new();
    ids.retain(|id| known.contains(id.as_str()) && seen.insert(id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_news;
    use serde_json::json;

    const LESSONS: [&str; 4] = ["greetings", "festivals", "family", "language"];

    #[test]
    fn default_document() {
        let state = ProgressState::default();
        assert!(state.completed_lessons.is_empty());
        assert!(state.read_news.is_empty());
        assert_eq!(state.streak, 1);
        assert_eq!(state.badges, vec![FIRST_STEPS]);
        assert_eq!(state.profile, ProfileInfo::default());
    }

    #[test]
    fn toggle_twice_restores_membership_and_keeps_streak() {
        let mut state = ProgressState::default();
        for id in LESSONS {
            let before = state.clone();
            assert!(state.toggle_lesson(id).unwrap());
            assert!(!state.toggle_lesson(id).unwrap());
            assert_eq!(state.completed_lessons, before.completed_lessons);
            assert_eq!(state.streak, before.streak + 1);
        }
    }

    #[test]
    fn unknown_lesson_is_not_found_and_unchanged() {
        let mut state = ProgressState::default();
        let before = state.clone();
        let err = state.toggle_lesson("does-not-exist").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(state, before);

        let err = state.toggle_news("does-not-exist").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn pathfinder_awarded_once_and_kept() {
        let mut state = ProgressState::default();
        for id in LESSONS {
            state.toggle_lesson(id).unwrap();
        }
        assert_eq!(state.badges.iter().filter(|b| *b == LESSON_PATHFINDER).count(), 1);

        state.toggle_lesson("family").unwrap();
        assert!(state.has_badge(LESSON_PATHFINDER));
        state.toggle_lesson("family").unwrap();
        assert_eq!(state.badges.iter().filter(|b| *b == LESSON_PATHFINDER).count(), 1);
        assert_eq!(state.streak, 6);
    }

    #[test]
    fn pathfinder_requires_custom_lessons_too() {
        let mut state = ProgressState::default();
        state
            .custom_lessons
            .push(LessonItem::new("lesson-tea-1", "Tea", "", "Custom"));
        for id in LESSONS {
            state.toggle_lesson(id).unwrap();
        }
        assert!(!state.has_badge(LESSON_PATHFINDER));
        state.toggle_lesson("lesson-tea-1").unwrap();
        assert!(state.has_badge(LESSON_PATHFINDER));
    }

    #[test]
    fn news_explorer_is_idempotent() {
        let mut state = ProgressState::default();
        for item in builtin_news() {
            state.toggle_news(&item.id).unwrap();
        }
        assert!(state.has_badge(NEWS_EXPLORER));
        assert_eq!(state.streak, 1);

        state.toggle_news("language-revival").unwrap();
        state.toggle_news("language-revival").unwrap();
        assert_eq!(state.badges.iter().filter(|b| *b == NEWS_EXPLORER).count(), 1);
    }

    #[test]
    fn read_stories_alias_is_accepted() {
        let state = ProgressState::from_document(&json!({"readStories": ["unesco-restoration"]}));
        assert_eq!(state.read_news, vec!["unesco-restoration"]);
    }

    #[test]
    fn read_news_wins_over_alias() {
        let doc = json!({"readNews": ["culture-now"], "readStories": ["unesco-restoration"]});
        let state = ProgressState::from_document(&doc);
        assert!(state.read_news.is_empty());
    }

    #[test]
    fn both_read_keys_load_without_error() {
        let doc = json!({
            "readNews": ["language-revival"],
            "readStories": ["unesco-restoration"]
        });
        let state = ProgressState::from_document(&doc);
        assert_eq!(state.read_news, vec!["language-revival"]);

        let written = serde_json::to_value(&state).unwrap();
        assert_eq!(written["readNews"], json!(["language-revival"]));
        assert!(written.get("readStories").is_none());
        assert_eq!(ProgressState::from_document(&written), state);
    }

    #[test]
    fn stale_and_duplicate_ids_are_dropped() {
        let doc = json!({
            "completedLessons": ["greetings", "retired-lesson", "greetings", "lesson-x-1"],
            "readNews": ["museum-repatriation", 42],
            "customLessons": [{"id": "lesson-x-1", "title": "X"}]
        });
        let state = ProgressState::from_document(&doc);
        assert_eq!(state.completed_lessons, vec!["greetings", "lesson-x-1"]);
        assert_eq!(state.read_news, vec!["museum-repatriation"]);
    }

    #[test]
    fn wrongly_typed_fields_fall_back() {
        let doc = json!({
            "completedLessons": "greetings",
            "streak": "seven",
            "badges": [],
            "customNews": {"id": "x"},
            "profile": ["nope"]
        });
        assert_eq!(ProgressState::from_document(&doc), ProgressState::default());
        assert_eq!(ProgressState::from_document(&json!([1, 2])), ProgressState::default());
    }

    #[test]
    fn streak_is_floored_at_one() {
        assert_eq!(ProgressState::from_document(&json!({"streak": 0})).streak, 1);
        assert_eq!(ProgressState::from_document(&json!({"streak": 4.7})).streak, 4);
        assert_eq!(ProgressState::from_document(&json!({"streak": 9})).streak, 9);
    }

    #[test]
    fn badges_keep_order_without_duplicates() {
        let doc = json!({"badges": ["News Explorer", "First Steps", "News Explorer"]});
        let state = ProgressState::from_document(&doc);
        assert_eq!(state.badges, vec![NEWS_EXPLORER, FIRST_STEPS]);

        let doc = json!({"badges": ["Lesson Pathfinder"]});
        let state = ProgressState::from_document(&doc);
        assert_eq!(state.badges, vec![FIRST_STEPS, LESSON_PATHFINDER]);
    }

    #[test]
    fn profile_is_merged_over_defaults() {
        let doc = json!({"profile": {"displayName": "Ama", "bio": ""}});
        let state = ProgressState::from_document(&doc);
        assert_eq!(state.profile.display_name, "Ama");
        assert_eq!(state.profile.bio, ProfileInfo::default().bio);
    }

    #[test]
    fn document_roundtrips_through_serde() {
        let mut state = ProgressState::default();
        state.toggle_lesson("greetings").unwrap();
        state.custom_news.push(NewsItem {
            id: "news-a-1".into(),
            title: "A".into(),
            source: "Desk".into(),
            date: "2026-01-01".into(),
            summary: String::new(),
            url: "https://example.com".into(),
        });
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.get("completedLessons").is_some());
        assert!(value.get("customNews").is_some());
        assert_eq!(ProgressState::from_document(&value), state);
    }

    #[test]
    fn reset_policies() {
        let mut state = ProgressState::default();
        state
            .custom_lessons
            .push(LessonItem::new("lesson-tea-1", "Tea", "", "Custom"));
        state.toggle_lesson("lesson-tea-1").unwrap();
        state.set_profile(&ProfileUpdate {
            region: Some("Andes".into()),
            ..ProfileUpdate::default()
        });

        let mut kept = state.clone();
        kept.reset(ResetPolicy::KeepCustomCatalog);
        assert_eq!(kept.custom_lessons.len(), 1);
        assert!(kept.completed_lessons.is_empty());
        assert_eq!(kept.streak, 1);
        assert_eq!(kept.profile, ProfileInfo::default());

        state.reset(ResetPolicy::Everything);
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn reset_policy_parses() {
        assert_eq!("everything".parse::<ResetPolicy>().unwrap(), ResetPolicy::Everything);
        assert_eq!(
            "Keep-Custom".parse::<ResetPolicy>().unwrap(),
            ResetPolicy::KeepCustomCatalog
        );
        assert!("sometimes".parse::<ResetPolicy>().is_err());
    }
}
