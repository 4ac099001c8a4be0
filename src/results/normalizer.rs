//! Provider payload normalization
//!
//! Pure functions that shape raw provider responses into the canonical
//! result types. Missing fields never drop a record; empty or failed
//! payloads become sentinel error outcomes.

use super::types::{ErrorPayload, ImageEntry, ImageOutcome, ImageResult, TextResult};
use serde::Deserialize;

/// Maximum number of entries kept from an image payload
pub const MAX_IMAGE_RESULTS: usize = 10;

/// Sentinel message for an image payload with no result list
pub const NO_IMAGE_RESULTS: &str = "No image results found";

/// One record of a provider result list; every field is optional on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderRecord {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
    pub source: Option<String>,
    pub displayed_link: Option<String>,
}

/// Raw payload of a text (organic) search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub organic_results: Vec<ProviderRecord>,
}

/// Raw payload of a reverse-image search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePayload {
    /// Provider-reported error indicator
    pub error: Option<String>,
    pub image_results: Option<Vec<ProviderRecord>>,
}

/// Normalize a text payload, preserving provider ranking order.
pub fn normalize_text(payload: TextPayload) -> Vec<TextResult> {
    payload
        .organic_results
        .into_iter()
        .map(|record| TextResult {
            title: record.title,
            link: record.link,
            snippet: record.snippet,
            source: record.displayed_link,
        })
        .collect()
}

/// Normalize a reverse-image payload.
///
/// A provider-reported error becomes a failed outcome; a missing or empty
/// result list becomes the no-results sentinel; otherwise the first
/// [`MAX_IMAGE_RESULTS`] records are kept with title and source fallbacks.
pub fn normalize_image(payload: ImagePayload) -> ImageOutcome {
    if let Some(error) = payload.error {
        return ImageOutcome::Failed(ErrorPayload::new(error));
    }

    let records = payload.image_results.unwrap_or_default();
    if records.is_empty() {
        return ImageOutcome::sentinel(NO_IMAGE_RESULTS);
    }

    let entries = records
        .into_iter()
        .take(MAX_IMAGE_RESULTS)
        .map(|record| {
            ImageEntry::Result(ImageResult {
                title: record
                    .title
                    .unwrap_or_else(|| "Image result".to_string()),
                link: record.link,
                thumbnail: record.thumbnail,
                source: record
                    .source
                    .or(record.displayed_link)
                    .unwrap_or_else(|| "Unknown source".to_string()),
            })
        })
        .collect();

    ImageOutcome::Entries(entries)
}
