use serde::{Deserialize, Serialize};
use std::fmt;

/// WeRead book identifier as reported by the notebook list.
///
/// The service sends it as a JSON string, but older payloads carry a bare
/// number; both deserialize into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self(value),
            RawId::Number(value) => Self(value.to_string()),
        })
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Chapter identifier within a book.
///
/// Highlights without a chapter are filed under chapter 1, so the default
/// value is `1` rather than `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterUid(u64);

impl ChapterUid {
    pub const FALLBACK: ChapterUid = ChapterUid(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for ChapterUid {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for ChapterUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_accepts_string_and_number() {
        let from_text: BookId = serde_json::from_str("\"3300064831\"").unwrap();
        let from_number: BookId = serde_json::from_str("3300064831").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(from_text.as_str(), "3300064831");
    }

    #[test]
    fn test_chapter_uid_defaults_to_first_chapter() {
        assert_eq!(ChapterUid::default().value(), 1);
        assert!(ChapterUid::new(1) < ChapterUid::new(2));
    }
}
