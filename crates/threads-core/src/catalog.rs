//! Lesson and news catalog.
//!
//! The catalog is the fixed set of built-in items followed by community
//! submissions in the order they were added. Submissions live inside the
//! persisted progress document; [`Catalog`] is a borrowed view over them.

use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{today, LessonItem, NewLesson, NewNews, NewsItem, DEFAULT_URL};

struct LessonSeed {
    id: &'static str,
    title: &'static str,
    summary: &'static str,
    meta: &'static str,
}

struct NewsSeed {
    id: &'static str,
    title: &'static str,
    source: &'static str,
    date: &'static str,
    summary: &'static str,
    url: &'static str,
}

static BUILTIN_LESSONS: [LessonSeed; 4] = [
    LessonSeed {
        id: "greetings",
        title: "Greeting Rituals Around the World",
        summary: "Understand why bows, handshakes, and cheek-kisses carry deep cultural meaning.",
        meta: "5 minutes · Beginner",
    },
    LessonSeed {
        id: "festivals",
        title: "Festival Traditions",
        summary: "Discover food, music, and symbols behind major seasonal festivals globally.",
        meta: "7 minutes · Beginner",
    },
    LessonSeed {
        id: "family",
        title: "Family & Community Values",
        summary: "Compare social norms around family roles, hospitality, and intergenerational respect.",
        meta: "8 minutes · Intermediate",
    },
    LessonSeed {
        id: "language",
        title: "Language, Proverbs & Identity",
        summary: "Learn how sayings and expressions preserve history, humor, and cultural wisdom.",
        meta: "10 minutes · Intermediate",
    },
];

static BUILTIN_NEWS: [NewsSeed; 4] = [
    NewsSeed {
        id: "unesco-restoration",
        title: "UNESCO Supports Restoration of Historic Cultural Sites",
        source: "Global Heritage Journal",
        date: "2026-02-12",
        summary: "A new preservation initiative is funding restoration work for community-led heritage landmarks across multiple regions.",
        url: "https://example.com/news/unesco-restoration",
    },
    NewsSeed {
        id: "diaspora-festival",
        title: "Diaspora Festival Highlights Intergenerational Food Traditions",
        source: "Culture Now",
        date: "2026-02-11",
        summary: "Cities worldwide are hosting culinary storytelling events where families share migration histories through traditional dishes.",
        url: "https://example.com/news/diaspora-festival",
    },
    NewsSeed {
        id: "language-revival",
        title: "Community Schools Expand Indigenous Language Revival Programs",
        source: "World Learning Desk",
        date: "2026-02-10",
        summary: "Grassroots education groups report rising youth participation in heritage language and oral tradition workshops.",
        url: "https://example.com/news/language-revival",
    },
    NewsSeed {
        id: "museum-repatriation",
        title: "Museums Announce New Repatriation Partnerships",
        source: "Arts & Society News",
        date: "2026-02-09",
        summary: "Institutions are collaborating with cultural councils to return artifacts and co-curate community narratives.",
        url: "https://example.com/news/museum-repatriation",
    },
];

/// Built-in lessons in display order.
pub fn builtin_lessons() -> Vec<LessonItem> {
    BUILTIN_LESSONS
        .iter()
        .map(|s| LessonItem::new(s.id, s.title, s.summary, s.meta))
        .collect()
}

/// Built-in news items in display order.
pub fn builtin_news() -> Vec<NewsItem> {
    BUILTIN_NEWS
        .iter()
        .map(|s| NewsItem {
            id: s.id.to_string(),
            title: s.title.to_string(),
            source: s.source.to_string(),
            date: s.date.to_string(),
            summary: s.summary.to_string(),
            url: s.url.to_string(),
        })
        .collect()
}

/// Combined view of built-in and custom entries.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    custom_lessons: &'a [LessonItem],
    custom_news: &'a [NewsItem],
}

impl<'a> Catalog<'a> {
    pub fn new(custom_lessons: &'a [LessonItem], custom_news: &'a [NewsItem]) -> Self {
        Self {
            custom_lessons,
            custom_news,
        }
    }

    /// Built-ins first, then custom lessons oldest-first.
    pub fn lessons(&self) -> Vec<LessonItem> {
        let mut lessons = builtin_lessons();
        lessons.extend_from_slice(self.custom_lessons);
        lessons
    }

    /// Built-ins first, then custom news oldest-first.
    pub fn news(&self) -> Vec<NewsItem> {
        let mut news = builtin_news();
        news.extend_from_slice(self.custom_news);
        news
    }

    pub fn lesson_ids(&self) -> impl Iterator<Item = &'a str> + 'a {
        let customs = self.custom_lessons;
        BUILTIN_LESSONS
            .iter()
            .map(|s| s.id)
            .chain(customs.iter().map(|l| l.id.as_str()))
    }

    pub fn news_ids(&self) -> impl Iterator<Item = &'a str> + 'a {
        let customs = self.custom_news;
        BUILTIN_NEWS
            .iter()
            .map(|s| s.id)
            .chain(customs.iter().map(|n| n.id.as_str()))
    }

    pub fn is_valid_lesson_id(&self, id: &str) -> bool {
        self.lesson_ids().any(|known| known == id)
    }

    pub fn is_valid_news_id(&self, id: &str) -> bool {
        self.news_ids().any(|known| known == id)
    }

    fn contains_id(&self, id: &str) -> bool {
        self.is_valid_lesson_id(id) || self.is_valid_news_id(id)
    }

    /// Build a custom lesson from submission input. Does not add it.
    pub fn new_lesson(&self, input: &NewLesson, ids: &mut dyn IdGenerator) -> Result<LessonItem> {
        let title = required_title(&input.title, "Lesson title is required")?;
        let meta = [&input.duration, &input.level]
            .into_iter()
            .filter_map(|part| non_blank(part))
            .collect::<Vec<_>>()
            .join(" · ");

        Ok(LessonItem {
            id: self.fresh_id("lesson", &title, ids),
            summary: non_blank(&input.summary)
                .unwrap_or("Community-created lesson")
                .to_string(),
            meta: if meta.is_empty() { "Custom".to_string() } else { meta },
            title,
        })
    }

    /// Build a custom news item from submission input. Does not add it.
    pub fn new_news(&self, input: &NewNews, ids: &mut dyn IdGenerator) -> Result<NewsItem> {
        let title = required_title(&input.title, "News title is required")?;

        Ok(NewsItem {
            id: self.fresh_id("news", &title, ids),
            source: non_blank(&input.source).unwrap_or("Community Desk").to_string(),
            date: non_blank(&input.date).map(str::to_string).unwrap_or_else(today),
            summary: non_blank(&input.summary)
                .unwrap_or("Community submitted cultural update.")
                .to_string(),
            url: non_blank(&input.url).unwrap_or(DEFAULT_URL).to_string(),
            title,
        })
    }

    fn fresh_id(&self, prefix: &str, title: &str, ids: &mut dyn IdGenerator) -> String {
        let slug = slugify(title);
        loop {
            let id = format!("{}-{}-{}", prefix, slug, ids.next_suffix(&slug));
            if !self.contains_id(&id) {
                return id;
            }
            tracing::debug!(%id, "generated id collides with catalog, retrying");
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required_title(title: &Option<String>, message: &str) -> Result<String> {
    non_blank(title)
        .map(str::to_string)
        .ok_or_else(|| Error::validation(message))
}

/// Maximum slug length before the suffix is appended.
pub const SLUG_MAX: usize = 40;

/// Lowercase `text`, collapse every run of non `[a-z0-9]` characters into a
/// single `-`, trim dashes, and cap at [`SLUG_MAX`]. Empty results become
/// `"item"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(SLUG_MAX);
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "item".to_string()
    } else {
        slug.to_string()
    }
}
