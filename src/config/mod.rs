//! Configuration module for WhatsTheContext-RS
//!
//! Handles loading and validating settings from YAML files and environment variables.
//! Settings are constructed once at process entry and passed by reference into the
//! components that need them; there is no global settings instance.

mod settings;

pub use settings::*;
