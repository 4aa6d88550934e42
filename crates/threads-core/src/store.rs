//! Serialized access to the progress document.
//!
//! Every mutation is a load, mutate, save cycle performed while holding one
//! mutex, so concurrent requests cannot overwrite each other's changes.
//! Reads skip the lock; the atomic rename in [`Storage::save`] means they
//! always observe a complete document.

use crate::error::{Error, Result};
use crate::ids::{HashIds, IdGenerator};
use crate::models::{LessonItem, NewLesson, NewNews, NewsItem, ProfileInfo, ProfileUpdate};
use crate::progress::{ProgressState, ResetPolicy};
use crate::storage::Storage;
use std::path::Path;
use std::sync::Mutex;

/// The catalog and progress store behind every API operation.
pub struct ProgressStore {
    storage: Storage,
    reset_policy: ResetPolicy,
    /// Guards load+mutate+save; owns the id generator used inside it.
    writer: Mutex<Box<dyn IdGenerator>>,
}

impl ProgressStore {
    /// Open the store at `path` with hashed id suffixes.
    pub fn open<P: AsRef<Path>>(path: P, reset_policy: ResetPolicy) -> Result<Self> {
        Ok(Self {
            storage: Storage::open(path)?,
            reset_policy,
            writer: Mutex::new(Box::new(HashIds::new())),
        })
    }

    /// Replace the id suffix source.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.writer = Mutex::new(Box::new(ids));
        self
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Current document.
    pub fn state(&self) -> ProgressState {
        self.storage.load()
    }

    /// Combined lesson catalog.
    pub fn lessons(&self) -> Vec<LessonItem> {
        self.storage.load().catalog().lessons()
    }

    /// Combined news catalog.
    pub fn news(&self) -> Vec<NewsItem> {
        self.storage.load().catalog().news()
    }

    pub fn profile(&self) -> ProfileInfo {
        self.storage.load().profile
    }

    pub fn is_valid_lesson_id(&self, id: &str) -> bool {
        self.storage.load().catalog().is_valid_lesson_id(id)
    }

    pub fn is_valid_news_id(&self, id: &str) -> bool {
        self.storage.load().catalog().is_valid_news_id(id)
    }

    /// Append a community lesson and return it.
    pub fn add_lesson(&self, input: &NewLesson) -> Result<LessonItem> {
        let lesson = self.transact(|state, ids| {
            let lesson = state.catalog().new_lesson(input, ids)?;
            state.custom_lessons.push(lesson.clone());
            Ok(lesson)
        })?;
        tracing::info!(id = %lesson.id, "custom lesson added");
        Ok(lesson)
    }

    /// Append a community news item and return it.
    pub fn add_news(&self, input: &NewNews) -> Result<NewsItem> {
        let item = self.transact(|state, ids| {
            let item = state.catalog().new_news(input, ids)?;
            state.custom_news.push(item.clone());
            Ok(item)
        })?;
        tracing::info!(id = %item.id, "custom news added");
        Ok(item)
    }

    /// Toggle a lesson's completion and return the saved document.
    pub fn toggle_lesson(&self, id: &str) -> Result<ProgressState> {
        self.transact(|state, _| {
            let complete = state.toggle_lesson(id)?;
            tracing::debug!(id, complete, streak = state.streak, "lesson toggled");
            Ok(state.clone())
        })
    }

    /// Toggle a news item's read flag and return the saved document.
    pub fn toggle_news(&self, id: &str) -> Result<ProgressState> {
        self.transact(|state, _| {
            let read = state.toggle_news(id)?;
            tracing::debug!(id, read, "news toggled");
            Ok(state.clone())
        })
    }

    /// Overwrite the profile and return what was saved.
    pub fn save_profile(&self, update: &ProfileUpdate) -> Result<ProfileInfo> {
        self.transact(|state, _| Ok(state.set_profile(update).clone()))
    }

    /// Reset according to the configured policy and return the new document.
    pub fn reset(&self) -> Result<ProgressState> {
        let policy = self.reset_policy;
        let state = self.transact(|state, _| {
            state.reset(policy);
            Ok(state.clone())
        })?;
        tracing::info!(?policy, "progress reset");
        Ok(state)
    }

    /// Run `f` against a freshly loaded document and persist the result.
    /// Nothing is written when `f` fails.
    fn transact<T>(
        &self,
        f: impl FnOnce(&mut ProgressState, &mut dyn IdGenerator) -> Result<T>,
    ) -> Result<T> {
        let mut ids = self
            .writer
            .lock()
            .map_err(|_| Error::Storage("progress lock poisoned".to_string()))?;
        let mut state = self.storage.load();
        let out = f(&mut state, &mut **ids)?;
        self.storage.save(&state)?;
        Ok(out)
    }
}
