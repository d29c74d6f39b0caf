//! Comparison JSON API.

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};

use super::super::error::ApiError;
use super::super::AppState;

/// `POST /api/compare` with `{ doc1, doc2 }`.
///
/// Returns the model's JSON verbatim on success. The body is read raw so that
/// malformed JSON yields the same structured error as every other failure.
pub async fn api_compare(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let analysis = state.comparison.handle(&body).await?;
    Ok(Json(analysis))
}
