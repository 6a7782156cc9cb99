//! Name-derivation namespaces
//!
//! Name-based identifiers (UUID v5) hash a name together with a namespace
//! identifier. All callers of [`Identifier::from_name`] share
//! [`IdentifierNamespace::DEFAULT`], so two subsystems that happen to use the
//! same name get the same identifier. Subsystems whose name domains must stay
//! apart derive their own namespace:
//!
//! ```
//! use lodestone_core::{Identifier, IdentifierNamespace};
//!
//! let assets = IdentifierNamespace::DEFAULT.derive("assets");
//! let scenes = IdentifierNamespace::DEFAULT.derive("scenes");
//!
//! assert_ne!(assets.identifier_for("main"), scenes.identifier_for("main"));
//! assert_eq!(
//!     IdentifierNamespace::DEFAULT.identifier_for("main"),
//!     Identifier::from_name("main"),
//! );
//! ```

use crate::identifier::Identifier;
use std::fmt;
use uuid::Uuid;

/// Namespace for name-based identifier generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentifierNamespace(Uuid);

impl IdentifierNamespace {
    /// Fixed engine-wide namespace: `76656c65-6373-4000-8000-000000000000`
    pub const DEFAULT: IdentifierNamespace =
        IdentifierNamespace(Uuid::from_u128(0x76656c65_6373_4000_8000_000000000000));

    /// Use an existing identifier as a namespace
    pub fn from_identifier(id: Identifier) -> Self {
        IdentifierNamespace(Uuid::from_bytes(*id.as_bytes()))
    }

    /// Derive a child namespace from a label
    ///
    /// The child is the name-based identifier of `label` within `self`, so
    /// derivation is deterministic and can be nested.
    pub fn derive(&self, label: &str) -> Self {
        IdentifierNamespace(Uuid::new_v5(&self.0, label.as_bytes()))
    }

    /// Generate the name-based identifier for `name` in this namespace
    pub fn identifier_for(&self, name: &str) -> Identifier {
        Identifier::from_uuid(Uuid::new_v5(&self.0, name.as_bytes()))
    }

    /// The namespace value as an identifier
    pub fn as_identifier(&self) -> Identifier {
        Identifier::from_uuid(self.0)
    }
}

impl Default for IdentifierNamespace {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for IdentifierNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
