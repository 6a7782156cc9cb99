//! Registry configuration
//!
//! Registries work with defaults out of the box; a [`RegistryConfig`] tunes
//! sizing, reverse lookups and name limits. It can be built in code or loaded
//! from TOML:
//!
//! ```toml
//! # Pre-size both indexes
//! initial_capacity = 256
//!
//! # Keep an identifier -> name index for O(1) reverse lookups
//! reverse_index = true
//!
//! # Reject names longer than this many bytes
//! max_name_length = 64
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a [`NameIdRegistry`](crate::NameIdRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Number of entries both indexes are pre-sized for (default: 0).
    #[serde(default)]
    pub initial_capacity: usize,

    /// Maintain an inverted identifier -> name index (default: false).
    ///
    /// Without it, identifier -> name lookups and removal by identifier scan
    /// the name index (O(n)). With it, both are O(1) at the cost of storing
    /// every name twice.
    #[serde(default)]
    pub reverse_index: bool,

    /// Maximum name length in bytes (default: unlimited).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_name_length: Option<usize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            initial_capacity: 0,
            reverse_index: false,
            max_name_length: None,
        }
    }
}

impl RegistryConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial capacity (builder pattern)
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable the inverted index (builder pattern)
    pub fn with_reverse_index(mut self, enabled: bool) -> Self {
        self.reverse_index = enabled;
        self
    }

    /// Set maximum name length (builder pattern)
    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = Some(max);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_name_length == Some(0) {
            return Err(ConfigError::ZeroMaxNameLength);
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# Registry configuration
#
# Pre-size both indexes for this many entries
initial_capacity = 0

# Keep an identifier -> name index for O(1) reverse lookups
reverse_index = false

# Reject names longer than this many bytes (unset = unlimited)
# max_name_length = 64
"#
    }
}

/// Registry configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a configuration
    #[error("Invalid registry config: {0}")]
    Parse(String),

    /// A maximum name length of zero would reject every name
    #[error("max_name_length must be at least 1")]
    ZeroMaxNameLength,
}
