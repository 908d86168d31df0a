// src/model/blocks.rs
//! Rendered display blocks of one book.

use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Heading depth. Chapter levels deeper than 3 collapse to `Three`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    pub fn from_chapter_level(level: u32) -> Self {
        match level {
            1 => HeadingLevel::One,
            2 => HeadingLevel::Two,
            _ => HeadingLevel::Three,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::One => 1,
            HeadingLevel::Two => 2,
            HeadingLevel::Three => 3,
        }
    }
}

/// Heading block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub level: HeadingLevel,
    pub text: String,
}

/// Callout block: one chunk of a highlight, note or summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub text: String,
    pub emoji: String,
    pub color: Color,
}

impl CalloutBlock {
    /// The callout as a single line, icon first.
    pub fn display_text(&self) -> String {
        format!("{} {}", self.emoji, self.text)
    }
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBlock {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderedBlock {
    TableOfContents,
    Heading(HeadingBlock),
    Callout(CalloutBlock),
    Quote(QuoteBlock),
}

impl RenderedBlock {
    pub fn block_type(&self) -> &'static str {
        match self {
            RenderedBlock::TableOfContents => "table_of_contents",
            RenderedBlock::Heading(_) => "heading",
            RenderedBlock::Callout(_) => "callout",
            RenderedBlock::Quote(_) => "quote",
        }
    }
}

impl fmt::Display for RenderedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedBlock::TableOfContents => write!(f, "[toc]"),
            RenderedBlock::Heading(h) => {
                write!(f, "{} {}", "#".repeat(h.level.depth()), h.text)
            }
            RenderedBlock::Callout(c) => write!(f, "[{}] {}", c.color, c.display_text()),
            RenderedBlock::Quote(q) => write!(f, "> {}", q.text),
        }
    }
}

/// Position of a block within a `RenderedBook`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockIndex(usize);

impl BlockIndex {
    pub fn get(&self) -> usize {
        self.0
    }
}

/// The ordered blocks of one book plus the quotes attached to them.
///
/// Quotes are not part of the main sequence; each hangs off the block that
/// was appended immediately before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBook {
    blocks: Vec<RenderedBlock>,
    quotes: BTreeMap<BlockIndex, QuoteBlock>,
}

impl RenderedBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block and returns its index.
    pub fn push(&mut self, block: RenderedBlock) -> BlockIndex {
        self.blocks.push(block);
        BlockIndex(self.blocks.len() - 1)
    }

    /// Attaches a quote to a previously appended block, replacing any earlier one.
    pub fn attach_quote(&mut self, parent: BlockIndex, quote: QuoteBlock) {
        debug_assert!(parent.0 < self.blocks.len());
        self.quotes.insert(parent, quote);
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn quote_for(&self, index: BlockIndex) -> Option<&QuoteBlock> {
        self.quotes.get(&index)
    }

    /// All quote attachments, ordered by parent index.
    pub fn attachments(&self) -> impl Iterator<Item = (BlockIndex, &QuoteBlock)> {
        self.quotes.iter().map(|(index, quote)| (*index, quote))
    }

    /// Callout blocks with their indices, in order.
    pub fn callouts(&self) -> impl Iterator<Item = (BlockIndex, &CalloutBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, block)| match block {
                RenderedBlock::Callout(callout) => Some((BlockIndex(i), callout)),
                _ => None,
            })
    }

    /// The blocks with each quote placed directly after its parent.
    pub fn flatten(&self) -> Vec<RenderedBlock> {
        let mut flat = Vec::with_capacity(self.blocks.len() + self.quotes.len());
        for (i, block) in self.blocks.iter().enumerate() {
            flat.push(block.clone());
            if let Some(quote) = self.quotes.get(&BlockIndex(i)) {
                flat.push(RenderedBlock::Quote(quote.clone()));
            }
        }
        flat
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
