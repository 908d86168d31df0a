// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Cookie attribute names that may appear in a pasted `Set-Cookie` style
/// string. They describe a cookie rather than being one.
const COOKIE_ATTRIBUTES: &[&str] = &[
    "path", "domain", "expires", "max-age", "secure", "httponly", "samesite", "version",
    "comment",
];

/// A single `name=value` pair from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePair {
    pub name: String,
    pub value: String,
}

impl CookiePair {
    /// Formats the pair the way it appears in a `Cookie` header.
    pub fn to_header_fragment(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// WeRead session credential, parsed from a raw `Cookie` header string.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pairs: Vec<CookiePair>,
}

impl SessionCookie {
    /// Parses a raw cookie string such as `wr_vid=1; wr_skey=abc`.
    ///
    /// Segments without `=` and cookie attributes (`Path`, `Expires`, ...)
    /// are ignored. At least one pair must survive.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::InvalidCookie {
                reason: "cookie string cannot be empty".to_string(),
            });
        }

        let pairs: Vec<CookiePair> = raw
            .split(';')
            .filter_map(|segment| {
                let (name, value) = segment.split_once('=')?;
                let name = name.trim();
                if name.is_empty()
                    || name.contains(char::is_whitespace)
                    || COOKIE_ATTRIBUTES.contains(&name.to_ascii_lowercase().as_str())
                {
                    return None;
                }
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                Some(CookiePair {
                    name: name.to_string(),
                    value: value.to_string(),
                })
            })
            .collect();

        if pairs.is_empty() {
            return Err(ValidationError::InvalidCookie {
                reason: "no name=value pairs found".to_string(),
            });
        }

        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[CookiePair] {
        &self.pairs
    }

    /// Names of the parsed cookies, safe to log.
    pub fn names(&self) -> Vec<&str> {
        self.pairs.iter().map(|p| p.name.as_str()).collect()
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("names", &self.names())
            .finish()
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are credentials; only names are shown.
        write!(f, "{} cookie(s): {}", self.pairs.len(), self.names().join(", "))
    }
}

/// Validated URL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl Serialize for ValidatedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url.trim()) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many memos go into one digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestSize(usize);

impl DigestSize {
    pub const MIN: usize = 1;

    pub fn new(value: usize) -> Result<Self, ValidationError> {
        if value < Self::MIN {
            return Err(ValidationError::BelowMinimum {
                value,
                min: Self::MIN,
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for DigestSize {
    fn default() -> Self {
        Self(crate::constants::DIGEST_DEFAULT_SIZE)
    }
}

/// A composed digest message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDigest(String);

impl RenderedDigest {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let cookie = SessionCookie::parse("wr_vid=123; wr_skey=abc; wr_name=\"reader\"").unwrap();
        assert_eq!(cookie.names(), vec!["wr_vid", "wr_skey", "wr_name"]);
        assert_eq!(cookie.pairs()[2].value, "reader");
        assert_eq!(cookie.pairs()[1].to_header_fragment(), "wr_skey=abc");
    }

    #[test]
    fn test_cookie_parsing_skips_attributes_and_garbage() {
        let cookie = SessionCookie::parse("wr_skey=abc; Path=/; HttpOnly; ; =orphan").unwrap();
        assert_eq!(cookie.names(), vec!["wr_skey"]);
    }

    #[test]
    fn test_cookie_without_pairs_is_rejected() {
        assert!(SessionCookie::parse("").is_err());
        assert!(SessionCookie::parse("   ").is_err());
        assert!(SessionCookie::parse("not a cookie").is_err());
        assert!(SessionCookie::parse("Path=/; Secure").is_err());
    }

    #[test]
    fn test_cookie_display_hides_values() {
        let cookie = SessionCookie::parse("wr_skey=supersecret").unwrap();
        assert!(!cookie.to_string().contains("supersecret"));
        assert!(!format!("{:?}", cookie).contains("supersecret"));
    }

    #[test]
    fn test_url_validation() {
        assert!(ValidatedUrl::parse("https://discord.com/api/webhooks/1/abc").is_ok());
        assert!(ValidatedUrl::parse("http://localhost:8080").is_ok());
        assert!(ValidatedUrl::parse("ftp://example.com").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }

    #[test]
    fn test_digest_size_bounds() {
        assert_eq!(DigestSize::default().get(), 5);
        assert!(DigestSize::new(1).is_ok());
        assert!(DigestSize::new(0).is_err());
        assert_eq!(DigestSize::new(30).unwrap().get(), 30);
    }
}
