// src/lib.rs
//! weread2discord library — draws a random digest of WeRead highlights and
//! posts it to a Discord-style webhook.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `RunConfig`
//! - **Domain model** — `Book`, `Highlight`, `RenderedBook`, etc.
//! - **Domain types** — `BookId`, `SessionCookie`, `DigestSize`, etc.
//! - **API client** — `WereadHttpClient`, `LibraryFetcher`, parsers
//! - **Formatting** — `render_book`, `chunk_text`
//! - **Digest and output** — `Digest`, `WebhookPublisher`, `deliver`

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod digest;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ConfigFile, DeliveryMode, RunConfig};

// --- Domain Model ---
pub use crate::model::{
    Book, BookHighlights, Chapter, ChapterIndex, Highlight, ReviewList, ReviewSummary,
};

// --- Rendered Blocks ---
pub use crate::model::blocks::{
    BlockIndex, CalloutBlock, HeadingBlock, HeadingLevel, QuoteBlock, RenderedBlock, RenderedBook,
};

// --- Domain Types ---
pub use crate::types::{
    BookId, ChapterUid, Color, CookiePair, DigestSize, RenderedDigest, SessionCookie,
    ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    parser::{parse_bookmark_list, parse_chapter_infos, parse_notebooks, parse_review_list},
    FetchMetadata, FetchResult, LibraryFetcher, ReadingRepository, WereadEndpoints,
    WereadHttpClient,
};

// --- Formatting ---
pub use crate::formatting::{chunk_text, render_book};

// --- Digest and Output ---
pub use crate::digest::{collect_memos, Digest, Memo};
pub use crate::output::{
    deliver, DeliveryTarget, Embed, OutputPlan, OutputReport, WebhookPayload, WebhookPublisher,
};

// --- Pipeline ---
pub use crate::pipeline::{
    build_memo_pool, Composition, DigestComposer, DigestDelivery, LibrarySource, RunSummary,
    WereadToDiscord,
};
