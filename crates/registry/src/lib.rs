//! Dual-keyed registry for Lodestone
//!
//! This crate provides the owning container for engine objects:
//! - NameIdRegistry: values reachable by name and by minted Identifier
//! - Ownership: by-value (`ValueRegistry`) and boxed-handle (`HandleRegistry`) storage
//! - RegistryConfig: sizing, inverted index, name limits (TOML-loadable)
//! - RegistryError / EmplaceError: insert-path failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ownership;
pub mod registry;

pub use config::{ConfigError, RegistryConfig};
pub use error::{EmplaceError, RegistryError, RegistryResult};
pub use ownership::{AsAny, Boxed, ByValue, Ownership};
pub use registry::{HandleRegistry, NameIdRegistry, ValueRegistry};

pub use lodestone_core::{Identifier, IdentifierGenerator};
