//! Post shortcodes and their numeric media IDs.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// URL-safe base64 alphabet Instagram encodes media IDs with.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Number of leading shortcode characters that encode the media ID.
const MEDIA_ID_CHARS: usize = 11;

/// Maximum accepted shortcode length (private posts carry a long suffix).
const MAX_SHORTCODE_LENGTH: usize = 64;

/// Instagram's short identifier for a single post, e.g. `BxqBZbQlH_9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcode(String);

impl Shortcode {
    /// Validate and wrap a shortcode.
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();

        if code.is_empty() {
            return Err(Error::Usage("Shortcode cannot be empty".to_string()));
        }

        if code.len() > MAX_SHORTCODE_LENGTH {
            return Err(Error::Usage(format!(
                "Shortcode '{}' is too long (maximum {} characters)",
                code, MAX_SHORTCODE_LENGTH
            )));
        }

        if let Some(bad) = code.bytes().find(|b| !ALPHABET.contains(b)) {
            return Err(Error::Usage(format!(
                "Shortcode '{}' contains invalid character '{}'",
                code, bad as char
            )));
        }

        Ok(Self(code.to_string()))
    }

    /// Build the shortcode for a numeric media ID.
    pub fn from_media_id(media_id: u128) -> Self {
        if media_id == 0 {
            return Self("A".to_string());
        }

        let mut id = media_id;
        let mut chars = Vec::new();
        while id > 0 {
            chars.push(ALPHABET[(id % 64) as usize]);
            id /= 64;
        }
        chars.reverse();

        Self(String::from_utf8_lossy(&chars).into_owned())
    }

    /// Decode the numeric media ID used by the media info endpoint.
    pub fn media_id(&self) -> u128 {
        self.0
            .bytes()
            .take(MEDIA_ID_CHARS)
            .filter_map(|b| ALPHABET.iter().position(|&a| a == b))
            .fold(0u128, |acc, digit| acc * 64 + digit as u128)
    }

    /// Borrow the shortcode text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Shortcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Shortcode::new(s)
    }
}

impl AsRef<str> for Shortcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
