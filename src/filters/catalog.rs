//! Source-category catalog and query composition

use serde::{Deserialize, Serialize};

/// Source category a text search can be narrowed to.
///
/// Declaration order is the catalog order used when composing the
/// refinement OR-group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    Article,
    Book,
    Video,
    Movie,
    Study,
    Social,
}

impl SourceCategory {
    /// All categories in catalog order
    pub const ALL: [SourceCategory; 6] = [
        SourceCategory::Article,
        SourceCategory::Book,
        SourceCategory::Video,
        SourceCategory::Movie,
        SourceCategory::Study,
        SourceCategory::Social,
    ];

    /// Query refinement fragment for this category
    pub fn query_fragment(&self) -> &'static str {
        match self {
            Self::Article => {
                "site:nytimes.com OR site:washingtonpost.com OR site:theguardian.com"
            }
            Self::Book => "intitle:\"book\" OR intext:\"published in\"",
            Self::Video => "site:youtube.com OR site:vimeo.com",
            Self::Movie => "intitle:\"movie\" OR intext:\"film\" OR intext:\"IMDb\"",
            Self::Study => "site:researchgate.net OR site:jstor.org OR site:academia.edu",
            Self::Social => "site:twitter.com OR site:tiktok.com OR site:instagram.com",
        }
    }
}

/// Compose the provider query string for a text search.
///
/// The query text is wrapped in exact-match quotes; requested category
/// fragments are appended as a single parenthesized OR-group, in catalog
/// order. Duplicate requests collapse and the output is deterministic for
/// a given input.
pub fn compose_query(query: &str, categories: &[SourceCategory]) -> String {
    let mut composed = format!("\"{}\"", query);

    let fragments: Vec<&str> = SourceCategory::ALL
        .iter()
        .filter(|category| categories.contains(category))
        .map(|category| category.query_fragment())
        .collect();

    if !fragments.is_empty() {
        composed.push_str(" (");
        composed.push_str(&fragments.join(" OR "));
        composed.push(')');
    }

    composed
}
