//! Error types for identifier handling
//!
//! Malformed identifier text is the only failure in this crate. It is
//! reported through [`ParseIdentifierError`] by the `FromStr` impl and
//! flattened to `None` by [`crate::Identifier::parse`].

use thiserror::Error;

/// Error when parsing an Identifier from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdentifierError {
    /// Input does not hold exactly 32 hex digits
    #[error("invalid identifier length: {length} hex digits (expected 32)")]
    InvalidLength {
        /// Number of hex digits found, hyphens and braces excluded
        length: usize,
    },

    /// Input holds a character other than a hex digit or hyphen, or its
    /// braces do not pair up
    #[error("malformed identifier '{input}': {reason}")]
    Malformed {
        /// The rejected input
        input: String,
        /// Description of the first problem found
        reason: String,
    },
}
