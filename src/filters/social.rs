//! Social-media domain filtering

use crate::results::{ErrorPayload, ImageEntry, ImageOutcome};

/// Domains that qualify a result as a social-media source
pub const SOCIAL_MEDIA_DOMAINS: [&str; 6] = [
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "tiktok.com",
    "pinterest.com",
    "reddit.com",
];

/// Sentinel message substituted when filtering leaves no results
pub const NO_SOCIAL_RESULTS: &str = "No social media results found";

/// True when the source string names a known social-media domain.
/// Matching is case-insensitive substring containment; provider source
/// fields are free-form, not guaranteed to be URLs.
pub fn is_social_source(source: &str) -> bool {
    let source = source.to_lowercase();
    SOCIAL_MEDIA_DOMAINS
        .iter()
        .any(|domain| source.contains(domain))
}

/// Keep only results from social-media sources.
///
/// A failed outcome passes through unchanged; errors are not filterable.
/// When nothing qualifies, the sequence is replaced by a single
/// [`NO_SOCIAL_RESULTS`] sentinel so callers can tell "no qualifying
/// results" from a fatal failure.
pub fn filter_social(outcome: ImageOutcome) -> ImageOutcome {
    let entries = match outcome {
        ImageOutcome::Failed(_) => return outcome,
        ImageOutcome::Entries(entries) => entries,
    };

    let filtered: Vec<ImageEntry> = entries
        .into_iter()
        .filter(|entry| match entry {
            ImageEntry::Result(result) => is_social_source(&result.source),
            ImageEntry::Error(_) => false,
        })
        .collect();

    if filtered.is_empty() {
        ImageOutcome::Entries(vec![ImageEntry::Error(ErrorPayload::new(
            NO_SOCIAL_RESULTS,
        ))])
    } else {
        ImageOutcome::Entries(filtered)
    }
}
