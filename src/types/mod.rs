use thiserror::Error;

mod colors;
mod domain_types;
mod ids;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid cookie: {reason}")]
    InvalidCookie { reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Value too small: {value}, expected at least {min}")]
    BelowMinimum { value: usize, min: usize },
}
