//! WhatsTheContext-RS: reverse search attribution backend written in Rust
//!
//! Accepts a text query or an uploaded image and returns candidate source
//! attributions by delegating to an external search provider, optionally
//! augmented by per-face reverse searches on the uploaded image.

pub mod config;
pub mod faces;
pub mod filters;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use network::{ProviderClient, ProviderError};
pub use search::{ImageSearch, ImageSearchOptions, TextSearch};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
