// src/formatting/block_renderer.rs
//! Block rendering engine: turns one book's highlights into display blocks.
//!
//! With chapter metadata the highlights are grouped under chapter headings,
//! without it they are rendered flat. Summaries always follow under a
//! single review heading.

use super::chunking::chunk_text;
use super::style::callout_emoji;
use crate::constants::{BLOCK_TEXT_CHUNK_CHARS, REVIEW_HEADING};
use crate::model::{
    BlockIndex, BookHighlights, CalloutBlock, ChapterIndex, HeadingBlock, HeadingLevel, Highlight,
    QuoteBlock, RenderedBlock, RenderedBook, ReviewSummary,
};
use crate::types::{ChapterUid, Color};
use indexmap::IndexMap;

/// Renders every block of one book.
pub fn render_book(book: &BookHighlights) -> RenderedBook {
    let mut rendered = RenderedBook::new();

    match &book.chapters {
        Some(chapters) if !book.highlights.is_empty() => {
            render_by_chapter(&mut rendered, chapters, &book.highlights)
        }
        _ => {
            for highlight in &book.highlights {
                render_highlight(&mut rendered, highlight);
            }
        }
    }

    if !book.summaries.is_empty() {
        rendered.push(RenderedBlock::Heading(HeadingBlock {
            level: HeadingLevel::One,
            text: REVIEW_HEADING.to_string(),
        }));
        for summary in &book.summaries {
            render_summary(&mut rendered, summary);
        }
    }

    log::debug!(
        "Rendered '{}' into {} blocks ({} quotes)",
        book.book.title,
        rendered.len(),
        rendered.attachments().count()
    );
    rendered
}

/// Emits a table of contents, then each chapter's heading and highlights.
///
/// Chapters appear in the order they are first seen in `highlights`.
/// Buckets whose chapter is missing from the index are rendered without a
/// heading.
fn render_by_chapter(rendered: &mut RenderedBook, chapters: &ChapterIndex, highlights: &[Highlight]) {
    rendered.push(RenderedBlock::TableOfContents);

    for (uid, bucket) in group_by_chapter(highlights) {
        if let Some(chapter) = chapters.get(uid) {
            rendered.push(RenderedBlock::Heading(HeadingBlock {
                level: HeadingLevel::from_chapter_level(chapter.level),
                text: chapter.title.clone(),
            }));
        }
        for highlight in bucket {
            render_highlight(rendered, highlight);
        }
    }
}

/// Buckets highlights by chapter, keeping first-seen chapter order and the
/// order within each bucket.
pub fn group_by_chapter(highlights: &[Highlight]) -> IndexMap<ChapterUid, Vec<&Highlight>> {
    let mut buckets: IndexMap<ChapterUid, Vec<&Highlight>> = IndexMap::new();
    for highlight in highlights {
        buckets
            .entry(highlight.chapter_uid)
            .or_default()
            .push(highlight);
    }
    buckets
}

/// Renders one highlight as callouts and attaches its abstract, if any, to
/// the last of them.
fn render_highlight(rendered: &mut RenderedBook, highlight: &Highlight) {
    let last = render_callouts(
        rendered,
        &highlight.mark_text,
        highlight.style,
        highlight.color_style,
        highlight.review_id.as_deref(),
    );

    if let Some(text) = highlight.non_empty_abstract() {
        rendered.attach_quote(
            last,
            QuoteBlock {
                text: text.to_string(),
            },
        );
    }
}

fn render_summary(rendered: &mut RenderedBook, summary: &ReviewSummary) {
    render_callouts(
        rendered,
        &summary.content,
        summary.style,
        summary.color_style,
        summary.review_id.as_deref(),
    );
}

/// Pushes one callout per text chunk and returns the index of the last.
fn render_callouts(
    rendered: &mut RenderedBook,
    text: &str,
    style: Option<i64>,
    color_style: Option<i64>,
    review_id: Option<&str>,
) -> BlockIndex {
    let emoji = callout_emoji(style, review_id);
    let color = Color::from_color_style(color_style);
    let callout = |chunk: &str| {
        RenderedBlock::Callout(CalloutBlock {
            text: chunk.to_string(),
            emoji: emoji.to_string(),
            color,
        })
    };

    let mut chunks = chunk_text(text, BLOCK_TEXT_CHUNK_CHARS).into_iter();
    let mut last = rendered.push(callout(chunks.next().unwrap_or_default()));
    for chunk in chunks {
        last = rendered.push(callout(chunk));
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, Chapter};

    fn highlight(chapter: u64, offset: u64, text: &str) -> Highlight {
        Highlight {
            chapter_uid: ChapterUid::new(chapter),
            range: Some(format!("{}-{}", offset, offset + 10)),
            mark_text: text.to_string(),
            style: Some(1),
            color_style: Some(3),
            ..Default::default()
        }
    }

    fn book(chapters: Option<ChapterIndex>, highlights: Vec<Highlight>) -> BookHighlights {
        BookHighlights {
            book: Book::new("b1", "Title", "Author"),
            chapters,
            summaries: Vec::new(),
            highlights,
        }
    }

    fn chapter(uid: u64, level: u32, title: &str) -> Chapter {
        Chapter {
            uid: ChapterUid::new(uid),
            level,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_grouping_keeps_discovery_order() {
        let highlights = vec![
            highlight(5, 0, "a"),
            highlight(2, 0, "b"),
            highlight(5, 10, "c"),
        ];
        let groups = group_by_chapter(&highlights);
        let order: Vec<u64> = groups.keys().map(|uid| uid.value()).collect();
        assert_eq!(order, vec![5, 2]);
        assert_eq!(groups[&ChapterUid::new(5)].len(), 2);
    }

    #[test]
    fn test_unknown_chapter_gets_no_heading() {
        let chapters: ChapterIndex = vec![chapter(1, 1, "One")].into_iter().collect();
        let rendered = render_book(&book(
            Some(chapters),
            vec![highlight(1, 0, "a"), highlight(9, 0, "b")],
        ));
        let types: Vec<&str> = rendered.blocks().iter().map(|b| b.block_type()).collect();
        assert_eq!(types, vec!["table_of_contents", "heading", "callout", "callout"]);
    }

    #[test]
    fn test_callout_styling() {
        let rendered = render_book(&book(None, vec![highlight(1, 0, "text")]));
        match &rendered.blocks()[0] {
            RenderedBlock::Callout(callout) => {
                assert_eq!(callout.emoji, "⭐");
                assert_eq!(callout.color, Color::Blue);
                assert_eq!(callout.text, "text");
            }
            other => panic!("Expected callout, got {:?}", other),
        }
    }

    #[test]
    fn test_abstract_attaches_to_last_chunk() {
        let mut long = highlight(1, 0, &"x".repeat(2500));
        long.abstract_text = Some("context".to_string());
        let rendered = render_book(&book(None, vec![highlight(1, 0, "first"), long]));

        assert_eq!(rendered.len(), 3);
        let attachments: Vec<(usize, &str)> = rendered
            .attachments()
            .map(|(i, q)| (i.get(), q.text.as_str()))
            .collect();
        assert_eq!(attachments, vec![(2, "context")]);
    }

    #[test]
    fn test_chapter_info_without_highlights_renders_nothing() {
        let chapters: ChapterIndex = vec![chapter(1, 1, "One")].into_iter().collect();
        let rendered = render_book(&book(Some(chapters), Vec::new()));
        assert!(rendered.is_empty());
    }
}
