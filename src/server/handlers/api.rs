//! API endpoint handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use super::super::AppState;
use crate::models::Side;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Current workspace state as JSON.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    let ws = state.workspace.read().await;
    let slot = |side| {
        ws.slot(side).map(|s| {
            json!({
                "name": s.name,
                "type": s.media_type,
                "chars": s.text.chars().count(),
            })
        })
    };

    Json(json!({
        "configured": state.comparison.ensure_configured().is_ok(),
        "original": slot(Side::Original),
        "modified": slot(Side::Modified),
        "comparing": ws.is_comparing(),
        "hasResult": ws.result().is_some(),
        "error": ws.error(),
    }))
}
