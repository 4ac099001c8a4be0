//! Query refinement and result filtering

mod catalog;
mod social;

pub use catalog::{compose_query, SourceCategory};
pub use social::{filter_social, is_social_source, NO_SOCIAL_RESULTS, SOCIAL_MEDIA_DOMAINS};
