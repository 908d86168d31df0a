use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color of a rendered block, derived from a highlight's `colorStyle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Red,
    Purple,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// Maps a WeRead highlight `colorStyle` code onto a display color.
    ///
    /// Total over its input: unknown codes and absent values fall back to
    /// `Color::Default`.
    pub fn from_color_style(color_style: Option<i64>) -> Self {
        match color_style {
            Some(1) => Color::Red,
            Some(2) => Color::Purple,
            Some(3) => Color::Blue,
            Some(4) => Color::Green,
            Some(5) => Color::Yellow,
            _ => Color::Default,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Red => "red",
            Color::Purple => "purple",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
