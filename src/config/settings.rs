//! Settings structures for WhatsTheContext-RS configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub faces: FaceSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SERPAPI_KEY") {
            self.provider.api_key = val;
        }
        if let Ok(val) = std::env::var("WTC_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("WTC_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("WTC_FACE_MODEL") {
            self.faces.model_path = val;
        }
    }

    /// Reject configurations that cannot serve any request.
    /// Every provider call requires the API key, so a missing key fails
    /// startup instead of failing each search.
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.trim().is_empty() {
            bail!("provider API key is not set (SERPAPI_KEY)");
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// External search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of the provider search endpoint
    pub base_url: String,
    /// API key sent with every provider call
    pub api_key: String,
    /// Timeout for reverse image lookups, in seconds
    pub image_timeout_secs: u64,
    /// Result count requested for text searches
    pub text_result_count: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://serpapi.com/search".to_string(),
            api_key: String::new(),
            image_timeout_secs: 30,
            text_result_count: 10,
        }
    }
}

/// Face detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceSettings {
    /// Path to the SeetaFace detection model
    pub model_path: String,
    /// Maximum concurrent per-face provider sub-searches
    pub max_concurrent: usize,
    /// Smallest face side length the detector reports, in pixels
    pub min_face_size: u32,
}

impl Default for FaceSettings {
    fn default() -> Self {
        Self {
            model_path: "models/seeta_fd_frontal_v1.0.bin".to_string(),
            max_concurrent: 4,
            min_face_size: 20,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.provider.base_url, "https://serpapi.com/search");
        assert_eq!(settings.provider.image_timeout_secs, 30);
        assert_eq!(settings.provider.text_result_count, 10);
        assert_eq!(settings.faces.max_concurrent, 4);
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_err());

        settings.provider.api_key = "key".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_merge_env_overrides() {
        std::env::set_var("SERPAPI_KEY", "env-key");
        std::env::set_var("WTC_PORT", "9100");

        let mut settings = Settings::default();
        settings.merge_env();

        assert_eq!(settings.provider.api_key, "env-key");
        assert_eq!(settings.server.port, 9100);

        std::env::remove_var("SERPAPI_KEY");
        std::env::remove_var("WTC_PORT");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
server:
  port: 8080
provider:
  api_key: "abc"
  image_timeout_secs: 5
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.provider.api_key, "abc");
        assert_eq!(settings.provider.image_timeout_secs, 5);
        // Unspecified sections fall back to defaults
        assert_eq!(settings.faces.min_face_size, 20);
    }
}
