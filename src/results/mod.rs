//! Result shaping and normalization
//!
//! Canonical result types returned to API consumers, plus the pure
//! normalization paths from raw provider payloads.

mod normalizer;
mod types;

pub use normalizer::{
    normalize_image, normalize_text, ImagePayload, ProviderRecord, TextPayload,
    MAX_IMAGE_RESULTS, NO_IMAGE_RESULTS,
};
pub use types::{
    ErrorPayload, FaceSearchOutcome, ImageEntry, ImageOutcome, ImageResult,
    ImageSearchResponse, TextResult,
};
