// src/digest/mod.rs
//! Random daily digest: flattens rendered callouts into memos, draws a
//! sample and composes the message text.
//!
//! Randomness is always injected, so a seeded generator reproduces a digest
//! exactly.

use crate::model::{Book, RenderedBook};
use crate::types::{DigestSize, RenderedDigest};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fmt::Write;

/// One drawable item: a callout with its book and attached quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo {
    pub book_title: String,
    pub quote_text: Option<String>,
    pub author: String,
    /// Callout icon and text, e.g. `"⭐ passage"`.
    pub display_text: String,
}

/// Derives one memo per callout block of a rendered book.
pub fn collect_memos(book: &Book, rendered: &RenderedBook) -> Vec<Memo> {
    rendered
        .callouts()
        .map(|(index, callout)| Memo {
            book_title: book.title.clone(),
            quote_text: rendered.quote_for(index).map(|quote| quote.text.clone()),
            author: book.author.clone(),
            display_text: callout.display_text(),
        })
        .collect()
}

/// Draws `min(count, pool.len())` distinct memos uniformly at random.
pub fn sample_memos<R>(pool: &[Memo], count: usize, rng: &mut R) -> Vec<Memo>
where
    R: Rng + ?Sized,
{
    pool.choose_multiple(rng, count).cloned().collect()
}

/// A drawn set of memos, ready to be composed into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    memos: Vec<Memo>,
}

impl Digest {
    /// Draws a digest from the pool, or `None` when there is nothing to draw.
    pub fn draw<R>(pool: &[Memo], size: DigestSize, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        if pool.is_empty() {
            return None;
        }
        Some(Self {
            memos: sample_memos(pool, size.get(), rng),
        })
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    /// Composes the message body.
    ///
    /// Layout per memo: the callout line, an optional `> quote` line, the
    /// attribution line, then a blank line.
    pub fn compose(&self) -> RenderedDigest {
        let mut message = format!(
            "早上好！\n以下是今天为您挑选的 {} 条读书笔记：\n\n",
            self.memos.len()
        );

        for memo in &self.memos {
            // Writing into a String cannot fail.
            let _ = writeln!(message, "{}", memo.display_text);
            if let Some(quote) = memo.quote_text.as_deref().filter(|q| !q.is_empty()) {
                let _ = writeln!(message, "> {}", quote);
            }
            let _ = writeln!(message, "—— 《{}》（{}）\n", memo.book_title, memo.author);
        }

        RenderedDigest::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn memo(i: usize) -> Memo {
        Memo {
            book_title: format!("Book {}", i),
            quote_text: None,
            author: "Author".to_string(),
            display_text: format!("⭐ memo {}", i),
        }
    }

    #[test]
    fn test_sample_size_is_capped_by_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool: Vec<Memo> = (0..3).map(memo).collect();
        assert_eq!(sample_memos(&pool, 5, &mut rng).len(), 3);

        let pool: Vec<Memo> = (0..40).map(memo).collect();
        assert_eq!(sample_memos(&pool, 5, &mut rng).len(), 5);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let pool: Vec<Memo> = (0..12).map(memo).collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let drawn = sample_memos(&pool, 5, &mut rng);
            let unique: HashSet<&str> = drawn.iter().map(|m| m.display_text.as_str()).collect();
            assert_eq!(unique.len(), drawn.len());
        }
    }

    #[test]
    fn test_same_seed_same_digest() {
        let pool: Vec<Memo> = (0..20).map(memo).collect();
        let first = Digest::draw(&pool, DigestSize::default(), &mut StdRng::seed_from_u64(42));
        let second = Digest::draw(&pool, DigestSize::default(), &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_pool_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Digest::draw(&[], DigestSize::default(), &mut rng).is_none());
    }

    #[test]
    fn test_compose_layout() {
        let mut with_quote = memo(1);
        with_quote.quote_text = Some("the passage".to_string());
        let mut empty_quote = memo(2);
        empty_quote.quote_text = Some(String::new());

        let digest = Digest {
            memos: vec![with_quote, empty_quote],
        };
        let expected = "早上好！\n以下是今天为您挑选的 2 条读书笔记：\n\n\
⭐ memo 1\n> the passage\n—— 《Book 1》（Author）\n\n\
⭐ memo 2\n—— 《Book 2》（Author）\n\n";
        assert_eq!(digest.compose().as_str(), expected);
    }
}
