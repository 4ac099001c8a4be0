//! Result type definitions

use crate::faces::BoundingBox;
use serde::Serialize;

/// A single normalized text search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextResult {
    /// The title of the result
    pub title: Option<String>,
    /// The URL of the result
    pub link: Option<String>,
    /// Content snippet
    pub snippet: Option<String>,
    /// Displayed source of the result
    pub source: Option<String>,
}

/// A single normalized reverse-image search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResult {
    /// The title of the result ("Image result" when the provider omits it)
    pub title: String,
    /// The URL of the result
    pub link: Option<String>,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
    /// Source of the result ("Unknown source" when the provider omits it)
    pub source: String,
}

/// Recoverable failure embedded in an otherwise successful response.
///
/// Never raised as a Rust error past the orchestrators; API consumers see
/// it in place of a result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// One element of an image result sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImageEntry {
    Result(ImageResult),
    /// Sentinel signalling an empty or degraded result, not a failure
    Error(ErrorPayload),
}

/// Outcome of a single reverse-image sub-search.
///
/// Serializes either as a JSON array of entries or, when the sub-search
/// itself failed, as a bare `{"error": ...}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImageOutcome {
    /// The provider answered; individual entries may still be sentinels
    Entries(Vec<ImageEntry>),
    /// The sub-search failed outright (timeout, transport, provider error)
    Failed(ErrorPayload),
}

impl ImageOutcome {
    /// Outcome for a failed sub-search
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(ErrorPayload::new(message))
    }

    /// Single-element sequence holding an empty-result sentinel
    pub fn sentinel(message: impl Into<String>) -> Self {
        Self::Entries(vec![ImageEntry::Error(ErrorPayload::new(message))])
    }
}

/// Search results attributed to one detected face
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceSearchOutcome {
    /// Position of the face in detection order, starting at 0
    pub face_index: usize,
    /// Face bounding box in source-image pixel coordinates
    pub position: BoundingBox,
    pub results: ImageOutcome,
}

/// Full response body for an image search request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSearchResponse {
    pub standard_results: ImageOutcome,
    /// Present only when face search was requested; empty when no faces
    /// were detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_results: Option<Vec<FaceSearchOutcome>>,
}
