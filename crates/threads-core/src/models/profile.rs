//! Learner profile shown on the profile page.

use crate::fields::{cap_chars, text_field};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DISPLAY_NAME_MAX: usize = 80;
pub const REGION_MAX: usize = 80;
pub const BIO_MAX: usize = 400;
pub const LEARNING_GOAL_MAX: usize = 200;

/// Profile fields. Every field always holds a non-empty, bounded value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub display_name: String,
    pub region: String,
    pub bio: String,
    pub learning_goal: String,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            display_name: "Cultural Learner".to_string(),
            region: "Global".to_string(),
            bio: "Exploring the world one tradition at a time.".to_string(),
            learning_goal: "Build daily cultural literacy habits.".to_string(),
        }
    }
}

impl ProfileInfo {
    /// Build a complete profile from an update. Absent fields take defaults,
    /// never the previous value.
    pub fn from_update(update: &ProfileUpdate) -> Self {
        let defaults = Self::default();
        Self {
            display_name: bounded(&update.display_name, defaults.display_name, DISPLAY_NAME_MAX),
            region: bounded(&update.region, defaults.region, REGION_MAX),
            bio: bounded(&update.bio, defaults.bio, BIO_MAX),
            learning_goal: bounded(&update.learning_goal, defaults.learning_goal, LEARNING_GOAL_MAX),
        }
    }
}

fn bounded(value: &Option<String>, default: String, max: usize) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => cap_chars(v, max),
        _ => default,
    }
}

/// Replacement values for the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub region: Option<String>,
    pub bio: Option<String>,
    pub learning_goal: Option<String>,
}

impl ProfileUpdate {
    /// Extract profile fields from a camelCase JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            display_name: text_field(object, "displayName"),
            region: text_field(object, "region"),
            bio: text_field(object, "bio"),
            learning_goal: text_field(object, "learningGoal"),
        }
    }
}
