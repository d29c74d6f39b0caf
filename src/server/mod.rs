//! Web server for comparing documents.
//!
//! Serves:
//! - `POST /api/compare`, the JSON comparison endpoint
//! - a single comparison page with upload, clear and compare forms
//! - a small status API and static assets

mod assets;
mod error;
mod handlers;
mod routes;
mod template_structs;

pub use error::{ApiError, COMPARE_FAILED};
pub use handlers::{NO_FILE_SELECTED, WRONG_UPLOAD_TYPE};
pub use routes::create_router;
pub use template_structs::IndexTemplate;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Settings;
use crate::extract::TextExtractor;
use crate::llm::{CompletionApi, OpenAiClient};
use crate::services::ComparisonService;
use crate::workspace::Workspace;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub comparison: ComparisonService,
    pub extractor: TextExtractor,
    /// The single comparison workspace shown on the page.
    pub workspace: Arc<RwLock<Workspace>>,
}

impl AppState {
    pub fn new(comparison: ComparisonService) -> Self {
        Self {
            comparison,
            extractor: TextExtractor::new(),
            workspace: Arc::new(RwLock::new(Workspace::new())),
        }
    }

    /// Build state backed by the configured completion API.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api: Arc<dyn CompletionApi> = Arc::new(OpenAiClient::new(settings.llm.clone())?);
        Ok(Self::new(ComparisonService::new(api, &settings.llm)))
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    if state.comparison.ensure_configured().is_err() {
        tracing::warn!("No API key configured; every comparison request will fail");
    }
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
