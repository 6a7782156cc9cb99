//! Identifier type
//!
//! An [`Identifier`] is an opaque 128-bit value used to key engine-owned
//! objects. It is backed by a UUID, but the UUID structure is not part of the
//! public contract: callers only see equality, ordering, hashing and the
//! canonical text form.
//!
//! ## Canonical Form
//!
//! Lowercase hex digits grouped 8-4-4-4-12 with hyphens:
//!
//! ```text
//! 550e8400-e29b-41d4-a716-446655440000
//! ```
//!
//! Parsing is case-insensitive, ignores hyphens wherever they appear and
//! accepts an optional pair of surrounding braces. Formatting always produces
//! the canonical form.
//!
//! ## Generation
//!
//! See [`crate::generation`] for the generation strategies (random,
//! sequential, seeded, name-derived, hash-derived).

use crate::error::ParseIdentifierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Hex digits in the text form of an identifier
const HEX_DIGITS: usize = 32;

/// Opaque 128-bit identifier
///
/// Equality is bitwise. The all-zero value is [`Identifier::INVALID`] and is
/// never produced by any generation strategy on ordinary input.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Uuid);

impl Identifier {
    /// The invalid (all-zero) identifier
    pub const INVALID: Identifier = Identifier(Uuid::nil());

    pub(crate) const fn from_uuid(uuid: Uuid) -> Self {
        Identifier(uuid)
    }

    /// Create an Identifier from raw bytes (big-endian)
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Identifier(Uuid::from_bytes(bytes))
    }

    /// Create an Identifier from its 128-bit value
    pub const fn from_u128(value: u128) -> Self {
        Identifier(Uuid::from_u128(value))
    }

    /// Get the raw bytes of this Identifier
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Get the 128-bit value of this Identifier
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// Check that this is not [`Identifier::INVALID`]
    ///
    /// This is not format validation: any 128-bit value other than zero is
    /// considered valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.0.is_nil()
    }

    /// Parse an Identifier from text
    ///
    /// Accepts exactly 32 hex digits in any letter case. Hyphens may appear
    /// anywhere and are ignored, and the whole text may be wrapped in one
    /// pair of braces. Returns `None` for malformed input (wrong digit
    /// count, invalid character, unbalanced braces).
    ///
    /// Use the [`FromStr`] impl to find out why parsing failed.
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Integer hash of this Identifier
    ///
    /// Folds the two 64-bit halves of the value together. Equal identifiers
    /// always produce equal hash codes. The string form is never involved.
    #[inline]
    pub fn hash_code(&self) -> u64 {
        let value = self.0.as_u128();
        ((value >> 64) as u64) ^ (value as u64)
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u128(self.0.as_u128());
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0.hyphenated())
    }
}

impl FromStr for Identifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| ParseIdentifierError::Malformed {
            input: s.to_string(),
            reason,
        };

        let body = match (s.strip_prefix('{'), s.ends_with('}')) {
            (Some(inner), true) => &inner[..inner.len() - 1],
            (None, false) => s,
            _ => return Err(malformed("unbalanced braces".to_string())),
        };

        // Hyphens are separators only and may appear anywhere
        let mut value: u128 = 0;
        let mut digits = 0usize;
        for (position, c) in body.chars().enumerate() {
            if c == '-' {
                continue;
            }
            let digit = c
                .to_digit(16)
                .ok_or_else(|| malformed(format!("invalid character '{}' at position {}", c, position)))?;
            if digits < HEX_DIGITS {
                value = (value << 4) | u128::from(digit);
            }
            digits += 1;
        }

        if digits != HEX_DIGITS {
            return Err(ParseIdentifierError::InvalidLength { length: digits });
        }
        Ok(Identifier::from_u128(value))
    }
}

impl TryFrom<&str> for Identifier {
    type Error = ParseIdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for [u8; 16] {
    fn from(id: Identifier) -> Self {
        *id.as_bytes()
    }
}

// ============================================================================
// Tests
// ============================================================================
