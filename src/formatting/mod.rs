// src/formatting/mod.rs
//! Renders fetched highlights into display blocks.

pub mod block_renderer;
pub mod chunking;
pub mod style;

pub use block_renderer::{group_by_chapter, render_book};
pub use chunking::chunk_text;
pub use style::callout_emoji;
