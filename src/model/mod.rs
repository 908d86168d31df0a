pub mod blocks;
mod highlights;

pub use blocks::*;
pub use highlights::*;

use crate::types::{BookId, ChapterUid};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A book from the reader's notebook list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Service-provided ordering key; the notebook list is sorted by it.
    pub sort: i64,
}

impl Book {
    pub fn new(id: impl Into<BookId>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            sort: 0,
        }
    }
}

/// Title and nesting level of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub uid: ChapterUid,
    pub level: u32,
    pub title: String,
}

/// Chapter metadata of a single book, keyed by chapter UID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterIndex {
    chapters: IndexMap<ChapterUid, Chapter>,
}

impl ChapterIndex {
    pub fn get(&self, uid: ChapterUid) -> Option<&Chapter> {
        self.chapters.get(&uid)
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl FromIterator<Chapter> for ChapterIndex {
    fn from_iter<I: IntoIterator<Item = Chapter>>(iter: I) -> Self {
        Self {
            chapters: iter.into_iter().map(|c| (c.uid, c)).collect(),
        }
    }
}

/// Everything fetched for one book, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BookHighlights {
    pub book: Book,
    pub chapters: Option<ChapterIndex>,
    pub summaries: Vec<ReviewSummary>,
    /// Bookmarks and notes, merged and sorted by position.
    pub highlights: Vec<Highlight>,
}
