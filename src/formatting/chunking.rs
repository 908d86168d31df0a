// src/formatting/chunking.rs
//! Splits long highlight text into block-sized pieces.

/// Splits `text` into contiguous chunks of at most `width` characters.
///
/// Widths are counted in `char`s, never bytes, so multi-byte text is never
/// cut inside a code point. Every chunk but the last is exactly `width`
/// characters long; concatenating the chunks yields `text`. Empty text
/// yields a single empty chunk so every highlight renders at least once.
pub fn chunk_text(text: &str, width: usize) -> Vec<&str> {
    if text.is_empty() || width == 0 {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / width + 1);
    let mut start = 0;
    let mut taken = 0;

    for (idx, _) in text.char_indices() {
        if taken == width {
            chunks.push(&text[start..idx]);
            start = idx;
            taken = 0;
        }
        taken += 1;
    }
    chunks.push(&text[start..]);

    chunks
}
