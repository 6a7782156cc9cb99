//! Test utilities for identity integration tests
//!
//! Provides tracing setup and small fixtures shared by the test modules.

#![allow(dead_code)]

pub use lodestone::{
    AsAny, EmplaceError, HandleRegistry, Identifier, IdentifierGenerator, IdentifierNamespace,
    RegistryConfig, RegistryError, ValueRegistry,
};
use std::sync::Once;

// =============================================================================
// Initialization
// =============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (shown with --nocapture)
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// Registry Creation
// =============================================================================

/// Registry with default configuration
pub fn value_registry<T>() -> ValueRegistry<T> {
    init_tracing();
    ValueRegistry::new()
}

/// Registry that keeps an inverted identifier -> name index
pub fn indexed_registry<T>() -> ValueRegistry<T> {
    init_tracing();
    ValueRegistry::with_config(RegistryConfig::new().with_reverse_index(true))
        .expect("valid registry config")
}

// =============================================================================
// Fixtures
// =============================================================================

/// Polymorphic engine object used by handle registry tests
pub trait Component: AsAny {
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Default)]
pub struct Transform {
    pub position: (f32, f32),
}

impl Component for Transform {
    fn kind(&self) -> &'static str {
        "transform"
    }
}

#[derive(Debug)]
pub struct Sprite {
    pub texture: String,
}

impl Sprite {
    /// Fails for empty texture names, like a loader would
    pub fn load(texture: &str) -> Result<Self, String> {
        if texture.is_empty() {
            Err("texture name is empty".to_string())
        } else {
            Ok(Sprite {
                texture: texture.to_string(),
            })
        }
    }
}

impl Component for Sprite {
    fn kind(&self) -> &'static str {
        "sprite"
    }
}
