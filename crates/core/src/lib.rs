//! Core identifier types for Lodestone
//!
//! This crate defines the identity layer used by engine-owned objects:
//! - Identifier: opaque 128-bit key with canonical text form
//! - Generation strategies: random, sequential, seeded, name-based, hash-based
//! - IdentifierGenerator: owned random generator handle
//! - IdentifierNamespace: namespaces for name-based generation
//! - ParseIdentifierError: reasons identifier text was rejected

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod generation;
pub mod identifier;
pub mod namespace;

pub use error::ParseIdentifierError;
pub use generation::IdentifierGenerator;
pub use identifier::Identifier;
pub use namespace::IdentifierNamespace;
