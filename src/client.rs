//! Client for the `/api/compare` endpoint.

use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::ComparisonResult;

/// Message used when the server gives no reason for a failure.
pub const GENERIC_FAILURE: &str = "Failed to compare documents";

/// Message used when a success response has the wrong shape.
pub const INVALID_RESPONSE: &str = "Invalid response format from API";

/// Errors returned by [`ComparisonClient::compare`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server answered with a non-success status.
    #[error("{0}")]
    Api(String),

    /// Server answered 2xx but the body is not a comparison result.
    #[error("{message}")]
    InvalidResponse { message: String, reason: String },

    /// Request never got a usable answer.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: INVALID_RESPONSE.to_string(),
            reason: reason.into(),
        }
    }
}

/// Talks to a doccompare server.
#[derive(Debug, Clone)]
pub struct ComparisonClient {
    base_url: String,
    client: Client,
}

impl ComparisonClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3030`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/compare", self.base_url)
    }

    /// Compare two documents through the server.
    pub async fn compare(&self, doc1: &str, doc2: &str) -> Result<ComparisonResult, ClientError> {
        let url = self.endpoint();
        debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "doc1": doc1, "doc2": doc2 }))
            .send()
            .await
            .map_err(|e| {
                error!("Comparison service error: {}", e);
                ClientError::Transport(e)
            })?;

        let status = resp.status();
        let body = resp.bytes().await?;
        let data: Option<Value> = serde_json::from_slice(&body).ok();

        if !status.is_success() {
            let message = data
                .as_ref()
                .and_then(|d| d.get("error"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FAILURE)
                .to_string();
            error!("Comparison failed ({}): {}", status, message);
            return Err(ClientError::Api(message));
        }

        let data = data.ok_or_else(|| ClientError::invalid("body is not JSON"))?;
        parse_result(&data)
    }
}

/// Validate a success body the way the client does.
pub fn parse_result(data: &Value) -> Result<ComparisonResult, ClientError> {
    ComparisonResult::from_value(data).map_err(|e| {
        error!("Invalid comparison response: {}", e);
        ClientError::invalid(e.to_string())
    })
}
