// src/api/library_fetcher.rs
//! Sequential walk over the reader's library.
//!
//! Books are fetched one at a time in notebook order. A failure on one
//! book never ends the walk: chapter metadata falls back to `None`, and a
//! failed bookmark or review fetch skips that book.

use super::ReadingRepository;
use crate::model::{merge_highlights, Book, BookHighlights};
use std::sync::Arc;

/// Result of a library walk with bookkeeping about what happened.
#[derive(Debug, Clone, Default)]
pub struct FetchResult<T> {
    pub data: T,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchMetadata {
    /// Books reported by the notebook list.
    pub books_listed: usize,
    /// Books whose highlights were fetched.
    pub books_fetched: usize,
    /// Books dropped after a bookmark or review fetch failed.
    pub books_skipped: usize,
    /// Whether the notebook list itself could not be read.
    pub notebook_list_failed: bool,
    pub warnings: Vec<String>,
}

/// Walks the notebook list and gathers every book's highlights.
pub struct LibraryFetcher {
    client: Arc<dyn ReadingRepository>,
}

impl LibraryFetcher {
    pub fn new(client: Arc<dyn ReadingRepository>) -> Self {
        Self { client }
    }

    /// Fetches the whole library.
    ///
    /// Never fails as a whole; problems are recorded in the metadata.
    pub async fn fetch_library(&self) -> FetchResult<Vec<BookHighlights>> {
        let mut metadata = FetchMetadata::default();

        let books = match self.client.list_notebooks().await {
            Ok(books) => books,
            Err(e) => {
                log::error!("Could not read the notebook list, nothing to sync: {}", e);
                metadata.notebook_list_failed = true;
                metadata.warnings.push(format!("notebook list: {}", e));
                return FetchResult {
                    data: Vec::new(),
                    metadata,
                };
            }
        };

        metadata.books_listed = books.len();
        let total = books.len();
        let mut library = Vec::with_capacity(total);

        for (i, book) in books.into_iter().enumerate() {
            log::info!("Syncing {} ({}/{})", book.title, i + 1, total);
            match self.fetch_book(book, &mut metadata).await {
                Some(highlights) => {
                    metadata.books_fetched += 1;
                    library.push(highlights);
                }
                None => metadata.books_skipped += 1,
            }
        }

        FetchResult {
            data: library,
            metadata,
        }
    }

    /// Fetches one book, or `None` when it has to be skipped.
    async fn fetch_book(&self, book: Book, metadata: &mut FetchMetadata) -> Option<BookHighlights> {
        let chapters = match self.client.fetch_chapter_info(&book.id).await {
            Ok(chapters) => chapters,
            Err(e) => {
                log::warn!("No chapter info for '{}': {}", book.title, e);
                metadata
                    .warnings
                    .push(format!("chapters of '{}': {}", book.title, e));
                None
            }
        };

        let bookmarks = match self.client.fetch_bookmark_list(&book.id).await {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                log::warn!("Skipping '{}': bookmark list failed: {}", book.title, e);
                metadata
                    .warnings
                    .push(format!("bookmarks of '{}': {}", book.title, e));
                return None;
            }
        };

        let reviews = match self.client.fetch_review_list(&book.id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                log::warn!("Skipping '{}': review list failed: {}", book.title, e);
                metadata
                    .warnings
                    .push(format!("reviews of '{}': {}", book.title, e));
                return None;
            }
        };

        log::debug!(
            "'{}': {} bookmarks, {} notes, {} summaries, chapters {}",
            book.title,
            bookmarks.len(),
            reviews.notes.len(),
            reviews.summaries.len(),
            if chapters.is_some() { "present" } else { "absent" }
        );

        Some(BookHighlights {
            book,
            chapters,
            summaries: reviews.summaries,
            highlights: merge_highlights(bookmarks, reviews.notes),
        })
    }
}
