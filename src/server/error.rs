//! Error responses for the JSON API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorBody;
use crate::services::CompareError;

/// Top-level message for every server-side comparison failure.
pub const COMPARE_FAILED: &str = "Error comparing documents";

/// Wraps a comparison failure for conversion into a response.
#[derive(Debug)]
pub struct ApiError(pub CompareError);

impl From<CompareError> for ApiError {
    fn from(err: CompareError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and body for this error.
    pub fn to_parts(&self) -> (StatusCode, ErrorBody) {
        match &self.0 {
            CompareError::Validation => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: self.0.to_string(),
                    details: None,
                },
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: COMPARE_FAILED.to_string(),
                    details: Some(other.to_string()),
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        if status.is_server_error() {
            tracing::error!("API route error: {}", self.0);
        } else {
            tracing::warn!("Rejected comparison request: {}", self.0);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let (status, body) = ApiError(CompareError::Validation).to_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Both documents are required");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_configuration_is_server_error_with_details() {
        let (status, body) = ApiError(CompareError::Configuration).to_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, COMPARE_FAILED);
        assert_eq!(
            body.details.as_deref(),
            Some("OpenAI API key is not configured")
        );
    }
}
