//! Threads of Tradition - catalog and progress core
//!
//! The state-reconciliation logic behind the cultural learning app: a
//! catalog of built-in and community-submitted lessons and news items, and a
//! persisted progress document tracking completions, reads, streak, badges
//! and the learner profile.
//!
//! # Architecture
//!
//! - **Models**: Catalog entries and profile ([`LessonItem`], [`NewsItem`], [`ProfileInfo`])
//! - **Catalog**: Built-in items, combined listing, id validation, submissions
//! - **Progress**: The persisted document and its toggle/badge transitions
//! - **Storage**: JSON file persistence with atomic replace
//! - **Store**: Mutex-serialized load, mutate, save cycles
//!
//! # Example
//!
//! ```no_run
//! use threads_core::{NewLesson, ProgressStore, ResetPolicy};
//!
//! fn main() -> threads_core::Result<()> {
//!     let store = ProgressStore::open("./data/state.json", ResetPolicy::default())?;
//!     let lesson = store.add_lesson(&NewLesson::titled("Tea Ceremony"))?;
//!     let state = store.toggle_lesson(&lesson.id)?;
//!     assert!(state.is_lesson_complete(&lesson.id));
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod fields;
pub mod ids;
pub mod models;
pub mod progress;
pub mod storage;
pub mod store;

pub use catalog::{builtin_lessons, builtin_news, slugify, Catalog};
pub use error::{Error, Result};
pub use ids::{HashIds, IdGenerator, SequenceIds};
pub use models::{LessonItem, NewLesson, NewNews, NewsItem, ProfileInfo, ProfileUpdate};
pub use progress::{ProgressState, ResetPolicy, FIRST_STEPS, LESSON_PATHFINDER, NEWS_EXPLORER};
pub use storage::Storage;
pub use store::ProgressStore;
