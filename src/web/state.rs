//! Application state shared across handlers

use crate::config::Settings;
use crate::faces::FaceDetector;
use crate::network::ProviderClient;
use crate::search::{ImageSearch, TextSearch};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Text search orchestrator
    pub text_search: Arc<TextSearch>,
    /// Image search orchestrator
    pub image_search: Arc<ImageSearch>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        client: ProviderClient,
        detector: Arc<dyn FaceDetector>,
    ) -> Self {
        let settings = Arc::new(settings);
        let client = Arc::new(client);
        let text_search = Arc::new(TextSearch::new(client.clone()));
        let image_search = Arc::new(ImageSearch::new(
            client,
            detector,
            settings.faces.max_concurrent,
        ));

        Self {
            settings,
            text_search,
            image_search,
        }
    }
}
