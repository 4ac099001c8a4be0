//! WhatsTheContext-RS: reverse search attribution backend
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use whatsthecontext_rs::{
    config::Settings,
    faces::RustfaceDetector,
    network::ProviderClient,
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting WhatsTheContext-RS v{}", whatsthecontext_rs::VERSION);

    // Load configuration; a missing API key fails here, not per request
    let settings = load_settings()?;
    settings.validate()?;

    // Initialize provider client
    let client = ProviderClient::with_settings(&settings.provider, &settings.outgoing)?;
    info!("Provider client initialized");

    // Load face detection model
    let detector =
        RustfaceDetector::from_file(&settings.faces.model_path, settings.faces.min_face_size)
            .with_context(|| format!("loading face model from {}", settings.faces.model_path))?;
    info!("Face detector initialized");

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    // Create application state and router
    let state = AppState::new(settings, client, Arc::new(detector));
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check environment variable first
    if let Ok(path) = std::env::var("WTC_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Try each default path
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("whatsthecontext-rs/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
