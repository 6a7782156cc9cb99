//! Integration tests for Lodestone identity management
//!
//! Organized by component:
//! - identifier_properties: generation, parsing and hashing contracts
//! - registry_scenarios: end-to-end registry behavior through the facade

mod test_utils;

mod identifier_properties;
