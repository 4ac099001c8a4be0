//! HTTP networking module
//!
//! Provides the transport wrapper for talking to the external search provider.

mod client;

pub use client::{ProviderClient, ProviderError};
