// src/api/responses.rs
//! Wire shapes of the WeRead JSON endpoints.
//!
//! Only the fields the sync reads are modelled; everything else in the
//! payloads is ignored by serde.

use crate::model::{Book, Chapter, Highlight, ReviewSummary};
use crate::types::{BookId, ChapterUid};
use serde::{Deserialize, Serialize};

/// Error envelope WeRead sends with HTTP 200 when the session is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub err_code: Option<i64>,
    pub err_msg: Option<String>,
}

impl ErrorEnvelope {
    pub fn is_error(&self) -> bool {
        matches!(self.err_code, Some(code) if code != 0)
    }
}

/// `GET /user/notebooks`
#[derive(Debug, Clone, Deserialize)]
pub struct NotebooksResponse {
    #[serde(default)]
    pub books: Vec<NotebookEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotebookEntry {
    pub book: BookPayload,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub book_id: BookId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// `POST /book/chapterInfos` request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterInfosRequest<'a> {
    #[serde(rename = "bookIds")]
    pub book_ids: [&'a str; 1],
    pub synckeys: [u64; 1],
    pub teenmode: u8,
}

impl<'a> ChapterInfosRequest<'a> {
    pub fn for_book(book: &'a BookId) -> Self {
        Self {
            book_ids: [book.as_str()],
            synckeys: [0],
            teenmode: 0,
        }
    }
}

/// `POST /book/chapterInfos` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterInfosResponse {
    pub data: Option<Vec<ChapterInfoData>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterInfoData {
    pub updated: Option<Vec<ChapterPayload>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPayload {
    pub chapter_uid: u64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub title: String,
}

/// `GET /book/bookmarklist`
#[derive(Debug, Clone, Deserialize)]
pub struct BookmarkListResponse {
    #[serde(default)]
    pub updated: Vec<BookmarkPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPayload {
    pub chapter_uid: Option<u64>,
    pub range: Option<String>,
    /// `null` on some payloads; read as empty.
    pub mark_text: Option<String>,
    pub style: Option<i64>,
    pub color_style: Option<i64>,
    pub review_id: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// `GET /review/list`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewListResponse {
    #[serde(default)]
    pub reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub review: ReviewPayload,
    pub style: Option<i64>,
    pub color_style: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    #[serde(rename = "type", default)]
    pub review_type: i64,
    pub content: Option<String>,
    pub review_id: Option<String>,
    pub chapter_uid: Option<u64>,
    pub range: Option<String>,
    pub style: Option<i64>,
    pub color_style: Option<i64>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> T;
}

impl ToDomain<Book> for NotebookEntry {
    fn to_domain(self) -> Book {
        Book {
            id: self.book.book_id,
            title: self.book.title,
            author: self.book.author,
            sort: self.sort,
        }
    }
}

impl ToDomain<Chapter> for ChapterPayload {
    fn to_domain(self) -> Chapter {
        Chapter {
            uid: ChapterUid::new(self.chapter_uid),
            level: self.level,
            title: self.title,
        }
    }
}

impl ToDomain<Highlight> for BookmarkPayload {
    fn to_domain(self) -> Highlight {
        Highlight {
            chapter_uid: self.chapter_uid.map(ChapterUid::new).unwrap_or_default(),
            range: self.range,
            mark_text: self.mark_text.unwrap_or_default(),
            style: self.style,
            color_style: self.color_style,
            review_id: self.review_id,
            abstract_text: self.abstract_text,
        }
    }
}

/// A note review becomes a highlight: its `content` is the marked text.
impl ToDomain<Highlight> for ReviewPayload {
    fn to_domain(self) -> Highlight {
        Highlight {
            chapter_uid: self.chapter_uid.map(ChapterUid::new).unwrap_or_default(),
            range: self.range,
            mark_text: self.content.unwrap_or_default(),
            style: self.style,
            color_style: self.color_style,
            review_id: self.review_id,
            abstract_text: self.abstract_text,
        }
    }
}

/// Summaries take their styling from the list entry, not the nested review.
impl ToDomain<ReviewSummary> for ReviewEntry {
    fn to_domain(self) -> ReviewSummary {
        ReviewSummary {
            content: self.review.content.unwrap_or_default(),
            review_id: self.review.review_id,
            style: self.style,
            color_style: self.color_style,
        }
    }
}
