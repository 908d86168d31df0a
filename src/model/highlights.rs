// src/model/highlights.rs
//! Bookmarks, notes and summaries of a single book.
//!
//! Bookmarks and notes share one shape (`Highlight`) so they can be merged
//! into a single position-ordered sequence. Summaries are never anchored to
//! a chapter and stay separate.

use crate::types::ChapterUid;
use serde::{Deserialize, Serialize};

/// A highlighted passage, or a note written against one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub chapter_uid: ChapterUid,
    /// Chapter-relative character range, `"start-end"`.
    pub range: Option<String>,
    pub mark_text: String,
    pub style: Option<i64>,
    pub color_style: Option<i64>,
    /// Present when this highlight is a written note.
    pub review_id: Option<String>,
    /// Passage the note was written against.
    pub abstract_text: Option<String>,
}

impl Highlight {
    /// In-chapter offset: the leading number of `range`, or 0.
    pub fn offset(&self) -> u64 {
        range_offset(self.range.as_deref())
    }

    /// Sort key placing highlights in reading order.
    pub fn position(&self) -> (ChapterUid, u64) {
        (self.chapter_uid, self.offset())
    }

    pub fn is_note(&self) -> bool {
        self.review_id.is_some()
    }

    /// The abstract, when it carries any text.
    pub fn non_empty_abstract(&self) -> Option<&str> {
        self.abstract_text.as_deref().filter(|s| !s.is_empty())
    }
}

/// A book-level review written by the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub content: String,
    pub review_id: Option<String>,
    pub style: Option<i64>,
    pub color_style: Option<i64>,
}

/// The review list of one book split by review type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewList {
    pub summaries: Vec<ReviewSummary>,
    pub notes: Vec<Highlight>,
}

/// Parses the leading number of a `"start-end"` range string.
///
/// Missing, empty and malformed ranges all yield 0.
pub fn range_offset(range: Option<&str>) -> u64 {
    range
        .and_then(|r| r.split('-').next())
        .and_then(|start| start.trim().parse().ok())
        .unwrap_or(0)
}

/// Sorts highlights into reading order: chapter first, then offset.
///
/// The sort is stable, so entries at the same position keep their order.
pub fn sort_by_position(highlights: &mut [Highlight]) {
    highlights.sort_by_key(Highlight::position);
}

/// Merges bookmarks with notes and re-sorts the result into reading order.
pub fn merge_highlights(mut bookmarks: Vec<Highlight>, notes: Vec<Highlight>) -> Vec<Highlight> {
    bookmarks.extend(notes);
    sort_by_position(&mut bookmarks);
    bookmarks
}
