// src/formatting/style.rs
//! Icon selection for rendered callouts.
//!
//! WeRead highlight styles: 0 is an underline, 1 a background fill,
//! 2 a wavy line. Notes always get the pen icon.

/// Icon for a written note, regardless of highlight style.
pub const NOTE_EMOJI: &str = "✍️";
/// Icon for an underlined passage (style 0).
pub const UNDERLINE_EMOJI: &str = "💡";
/// Icon for a background-filled passage (style 1).
pub const FILL_EMOJI: &str = "⭐";
/// Icon for every other style.
pub const DEFAULT_EMOJI: &str = "🌟";

/// Picks the callout icon for a highlight.
pub fn callout_emoji(style: Option<i64>, review_id: Option<&str>) -> &'static str {
    if review_id.is_some() {
        return NOTE_EMOJI;
    }
    match style {
        Some(0) => UNDERLINE_EMOJI,
        Some(1) => FILL_EMOJI,
        _ => DEFAULT_EMOJI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_icons() {
        assert_eq!(callout_emoji(Some(0), None), "💡");
        assert_eq!(callout_emoji(Some(1), None), "⭐");
        assert_eq!(callout_emoji(Some(2), None), "🌟");
        assert_eq!(callout_emoji(None, None), "🌟");
    }

    #[test]
    fn test_notes_override_style() {
        for style in [None, Some(0), Some(1), Some(2)] {
            assert_eq!(callout_emoji(style, Some("review-1")), "✍️");
        }
        // An empty review id still marks a note.
        assert_eq!(callout_emoji(Some(0), Some("")), "✍️");
    }
}
