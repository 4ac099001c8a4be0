//! Text search orchestration

use crate::filters::{compose_query, SourceCategory};
use crate::network::{ProviderClient, ProviderError};
use crate::results::{normalize_text, TextResult};
use std::sync::Arc;
use tracing::debug;

/// Orchestrates provider-backed text searches.
///
/// The text path has exactly one upstream call, so any provider failure is
/// surfaced to the caller as fatal; there is no partial result to preserve.
/// This is deliberately asymmetric with the image path.
pub struct TextSearch {
    client: Arc<ProviderClient>,
}

impl TextSearch {
    pub fn new(client: Arc<ProviderClient>) -> Self {
        Self { client }
    }

    /// Compose the provider query, invoke the provider, and normalize the
    /// payload. Result order is the provider's ranking order.
    pub async fn search(
        &self,
        query: &str,
        categories: &[SourceCategory],
    ) -> Result<Vec<TextResult>, ProviderError> {
        let composed = compose_query(query, categories);
        debug!("text search query: {}", composed);

        let payload = self.client.search_text(&composed).await?;
        Ok(normalize_text(payload))
    }
}
