//! Token (cartridge) identifiers.
//!
//! A `TokenId` is always a real tag id. "No token on the reader" is never a
//! `TokenId` value; it is expressed by `Option::None` at the reader and by the
//! settled-empty presence state in the controller.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Normalized id of a physical RFID tag: trimmed, ASCII-lowercase, non-empty,
/// without whitespace or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct TokenId(String);

impl TokenId {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(Error::InvalidToken(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Hex-encode a raw UID as read from the tag.
    ///
    /// Returns `None` for an empty UID, which no reader should report for a
    /// real tag.
    pub fn from_bytes(uid: &[u8]) -> Option<Self> {
        if uid.is_empty() {
            return None;
        }
        Some(Self(uid.iter().map(|b| format!("{b:02x}")).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TokenId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TokenId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
