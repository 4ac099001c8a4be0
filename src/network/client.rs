//! HTTP client for the external search provider

use crate::config::{OutgoingSettings, ProviderSettings};
use crate::results::{ImagePayload, TextPayload};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

/// Failure modes of one provider call.
///
/// The client never decides fatality: the text path aborts the request on
/// any variant, the image path converts each variant into an embedded
/// error payload so sibling sub-searches still complete.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("invalid provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Client wrapper issuing GET requests to the provider search endpoint
#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    api_key: String,
    text_result_count: u32,
    image_timeout: Duration,
}

impl ProviderClient {
    /// Create a new client from provider and outgoing settings
    pub fn with_settings(
        provider: &ProviderSettings,
        outgoing: &OutgoingSettings,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(outgoing.request_timeout))
            .pool_max_idle_per_host(outgoing.pool_maxsize)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: provider.base_url.clone(),
            api_key: provider.api_key.clone(),
            text_result_count: provider.text_result_count,
            image_timeout: Duration::from_secs(provider.image_timeout_secs),
        })
    }

    /// Timeout applied to reverse image lookups, in whole seconds
    pub fn image_timeout_secs(&self) -> u64 {
        self.image_timeout.as_secs()
    }

    /// Organic text search for a composed query string
    pub async fn search_text(&self, query: &str) -> Result<TextPayload, ProviderError> {
        let num = self.text_result_count.to_string();
        let params = [
            ("engine", "google"),
            ("q", query),
            ("num", num.as_str()),
            ("api_key", self.api_key.as_str()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Reverse image search over raw image bytes.
    /// The bytes travel base64-encoded in the `image_content` parameter.
    pub async fn reverse_image(&self, image: &[u8]) -> Result<ImagePayload, ProviderError> {
        let encoded = BASE64.encode(image);
        let params = [
            ("engine", "google_reverse_image"),
            ("image_content", encoded.as_str()),
            ("api_key", self.api_key.as_str()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.image_timeout)
            .query(&params)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Translate a raw response into a typed payload
    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
