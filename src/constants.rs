// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// WeRead service
// ---------------------------------------------------------------------------

/// Public web front page, visited once to pick up session cookies.
pub const WEREAD_WEB_URL: &str = "https://weread.qq.com/";

/// Host serving the JSON endpoints the sync reads from.
pub const WEREAD_API_BASE_URL: &str = "https://i.weread.qq.com";

/// Review list type code for a book-level summary.
pub const REVIEW_TYPE_SUMMARY: i64 = 4;

/// Review list type code for a note anchored to a highlight.
pub const REVIEW_TYPE_NOTE: i64 = 1;

/// Upper bound for a single HTTP round trip.
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Maximum characters in one rendered callout. Longer highlights are split.
pub const BLOCK_TEXT_CHUNK_CHARS: usize = 2000;

/// Heading placed above a book's summary reviews.
pub const REVIEW_HEADING: &str = "点评";

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Number of memos drawn for a digest unless overridden on the command line.
pub const DIGEST_DEFAULT_SIZE: usize = 5;

/// Embed title shown above the digest.
pub const DIGEST_TITLE: &str = "我的读书笔记随选";

/// Accent color of the digest embed (0x2A2A2A).
pub const DIGEST_EMBED_COLOR: u32 = 2_763_306;

/// Discord refuses embeds whose description is longer than this.
pub const EMBED_DESCRIPTION_MAX_CHARS: usize = 4096;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration file looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "config.json";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
