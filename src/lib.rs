//! Lodestone - identity management for engine-owned objects
//!
//! Lodestone provides two building blocks:
//! - [`Identifier`]: an opaque 128-bit key with random, sequential, seeded,
//!   name-based and hash-based generation
//! - [`NameIdRegistry`]: an owning container whose entries are reachable by a
//!   caller-chosen name and by an identifier the registry mints
//!
//! # Quick Start
//!
//! ```
//! use lodestone::{Identifier, ValueRegistry};
//!
//! let mut scenes = ValueRegistry::<String>::new();
//! let id = scenes.add("intro", "Intro scene".to_string()).unwrap();
//!
//! assert_eq!(scenes.get(id).map(String::as_str), Some("Intro scene"));
//! assert_eq!(scenes.identifier_of("intro"), Some(id));
//!
//! let text = id.to_string();
//! assert_eq!(Identifier::parse(&text), Some(id));
//! ```

pub use lodestone_core::{
    Identifier, IdentifierGenerator, IdentifierNamespace, ParseIdentifierError,
};
pub use lodestone_registry::{
    AsAny, Boxed, ByValue, ConfigError, EmplaceError, HandleRegistry, NameIdRegistry, Ownership,
    RegistryConfig, RegistryError, RegistryResult, ValueRegistry,
};
