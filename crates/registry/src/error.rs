//! Error types for registry operations
//!
//! Insert-path failures come in two families:
//! - [`RegistryError`]: the registry refused the insert (duplicate name,
//!   invalid name, identifier collision, subtype mismatch)
//! - [`EmplaceError::Construction`]: the caller's constructor failed; its
//!   error is carried unchanged
//!
//! Every failure leaves the registry exactly as it was before the call.
//! Lookups never fail; they return `None`/`false` on a miss.

use lodestone_core::Identifier;
use std::convert::Infallible;
use thiserror::Error;

/// Result type alias for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Reasons a registry refused an insert
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Name is already mapped to an entry
    #[error("Name '{0}' already exists")]
    DuplicateName(String),

    /// Name exceeds the configured maximum length
    #[error("Name too long: {length} bytes (max {max})")]
    NameTooLong {
        /// Length of the rejected name in bytes
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// Freshly minted identifier is already present in the value index
    #[error("Identifier {0} already present in registry")]
    IdentifierCollision(Identifier),

    /// Polymorphic emplace produced a handle to a different concrete type
    #[error("Stored handle is not a {expected}")]
    SubtypeMismatch {
        /// Type name the caller asked for
        expected: &'static str,
    },
}

/// Failure of an in-place construction
#[derive(Debug, Error)]
pub enum EmplaceError<E> {
    /// The registry refused the insert; the constructor may not have run
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The constructor failed
    #[error("Value construction failed: {0}")]
    Construction(E),
}

impl<E> EmplaceError<E> {
    /// Check whether the name was already taken
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, EmplaceError::Registry(RegistryError::DuplicateName(_)))
    }

    /// Recover the constructor's error, if that is what failed
    pub fn into_construction(self) -> Option<E> {
        match self {
            EmplaceError::Construction(err) => Some(err),
            EmplaceError::Registry(_) => None,
        }
    }
}

impl EmplaceError<Infallible> {
    /// Narrow an infallible-construction failure to the registry error
    pub fn into_registry_error(self) -> RegistryError {
        match self {
            EmplaceError::Registry(err) => err,
            EmplaceError::Construction(never) => match never {},
        }
    }
}
