//! Common serde default value functions
//!
//! Shared by boss type and spawner definitions.

/// Default for boolean flags that are on unless disabled
pub fn default_true() -> bool {
    true
}
