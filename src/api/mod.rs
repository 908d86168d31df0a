//! WeRead API interaction — the ability to read a reader's library.
//!
//! This module provides a data-oriented interface to the WeRead API,
//! with clear separation between I/O operations, parsing, and business logic.

pub mod client;
mod library_fetcher;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::model::{Book, ChapterIndex, Highlight, ReviewList};
use crate::types::BookId;

/// The ability to read highlights from a WeRead account.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Books with highlights, ordered by the service's sort key.
    async fn list_notebooks(&self) -> Result<Vec<Book>, AppError>;

    /// Chapter metadata, or `None` when the service answers in an
    /// unexpected shape.
    async fn fetch_chapter_info(&self, book: &BookId) -> Result<Option<ChapterIndex>, AppError>;

    /// Bookmarks in reading order.
    async fn fetch_bookmark_list(&self, book: &BookId) -> Result<Vec<Highlight>, AppError>;

    /// Reviews split into summaries and notes.
    async fn fetch_review_list(&self, book: &BookId) -> Result<ReviewList, AppError>;
}

// Re-export the public interface
pub use client::{WereadEndpoints, WereadHttpClient};
pub use library_fetcher::{FetchMetadata, FetchResult, LibraryFetcher};
