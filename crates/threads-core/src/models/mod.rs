//! Catalog and profile models.
//!
//! - [`LessonItem`] / [`NewLesson`] - lesson cards and their submission input
//! - [`NewsItem`] / [`NewNews`] - news entries and their submission input
//! - [`ProfileInfo`] / [`ProfileUpdate`] - learner profile

mod lesson;
mod news;
mod profile;

pub use lesson::{LessonItem, NewLesson};
pub use news::{today, NewNews, NewsItem, DEFAULT_URL};
pub use profile::{
    ProfileInfo, ProfileUpdate, BIO_MAX, DISPLAY_NAME_MAX, LEARNING_GOAL_MAX, REGION_MAX,
};
