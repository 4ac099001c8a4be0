//! HTTP request handlers

use super::state::AppState;
use crate::filters::SourceCategory;
use crate::results::TextResult;
use crate::search::ImageSearchOptions;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

/// Body of a text search request
#[derive(Debug, Deserialize)]
pub struct TextQuery {
    /// Free-text query
    pub text: String,
    /// Optional source categories to narrow the search to
    #[serde(default)]
    pub sources: Vec<SourceCategory>,
}

/// Response body for a text search
#[derive(Debug, Serialize)]
pub struct TextSearchResponse {
    pub results: Vec<TextResult>,
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "active" }))
}

/// Text search handler.
/// Provider failures abort the request with a descriptive 500.
pub async fn search_text(
    State(state): State<AppState>,
    Json(query): Json<TextQuery>,
) -> Response {
    if query.text.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "text query must not be empty").into_response();
    }

    match state.text_search.search(&query.text, &query.sources).await {
        Ok(results) => Json(TextSearchResponse { results }).into_response(),
        Err(err) => {
            error!("text search failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Text search failed: {}", err),
            )
                .into_response()
        }
    }
}

/// Image search handler (multipart upload).
/// Once a file is present the response is always 200; sub-search failures
/// are embedded in the payload.
pub async fn search_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<Bytes> = None;
    let mut options = ImageSearchOptions::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("malformed multipart body: {}", err),
                )
                    .into_response()
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => match field.bytes().await {
                Ok(bytes) => file = Some(bytes),
                Err(err) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        format!("invalid file upload: {}", err),
                    )
                        .into_response()
                }
            },
            Some("search_faces") => {
                if let Ok(text) = field.text().await {
                    if let Some(value) = parse_flag(&text) {
                        options.search_faces = value;
                    }
                }
            }
            Some("search_social") => {
                if let Ok(text) = field.text().await {
                    if let Some(value) = parse_flag(&text) {
                        options.search_social = value;
                    }
                }
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        return (StatusCode::BAD_REQUEST, "missing file field").into_response();
    };

    let response = state.image_search.search(&file, options).await;
    Json(response).into_response()
}

/// Lenient boolean form-field parsing; unparsable values keep the default.
fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
