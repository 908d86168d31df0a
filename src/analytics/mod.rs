// src/analytics/mod.rs
//! Content measurement for the completion summary.

use crate::model::{BookHighlights, RenderedBlock, RenderedBook};

/// Counts across the whole fetched library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryMeasurement {
    pub books: usize,
    pub bookmarks: usize,
    pub notes: usize,
    pub summaries: usize,
    pub books_with_chapters: usize,
}

/// Counts across rendered output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderMeasurement {
    pub headings: usize,
    pub callouts: usize,
    pub quotes: usize,
}

/// Measures fetched highlights before rendering.
pub fn measure_library(library: &[BookHighlights]) -> LibraryMeasurement {
    library
        .iter()
        .fold(LibraryMeasurement::default(), |mut m, book| {
            let notes = book.highlights.iter().filter(|h| h.is_note()).count();
            m.books += 1;
            m.notes += notes;
            m.bookmarks += book.highlights.len() - notes;
            m.summaries += book.summaries.len();
            if book.chapters.is_some() {
                m.books_with_chapters += 1;
            }
            m
        })
}

/// Measures one rendered book and adds it to a running total.
pub fn measure_rendered(total: &mut RenderMeasurement, rendered: &RenderedBook) {
    for block in rendered.blocks() {
        match block {
            RenderedBlock::Heading(_) => total.headings += 1,
            RenderedBlock::Callout(_) => total.callouts += 1,
            RenderedBlock::TableOfContents | RenderedBlock::Quote(_) => {}
        }
    }
    total.quotes += rendered.attachments().count();
}
