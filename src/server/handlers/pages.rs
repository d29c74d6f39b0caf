//! HTML page and form handlers.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use super::super::error::ApiError;
use super::super::template_structs::IndexTemplate;
use super::super::AppState;
use crate::client::parse_result;
use crate::extract::{is_accepted_upload, UploadedFile};
use crate::models::{ComparisonResult, Side};
use crate::services::ComparisonService;
use crate::workspace::{CompareTicket, DocumentSlot};

/// Shown when the picker lets through something that is neither text nor PDF.
pub const WRONG_UPLOAD_TYPE: &str = "Por favor, sube un archivo PDF o de texto";

/// Shown when the form was submitted without a file.
pub const NO_FILE_SELECTED: &str = "No se seleccionó ningún archivo";

/// The comparison page.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let configured = state.comparison.ensure_configured().is_ok();
    let ws = state.workspace.read().await;
    let template = IndexTemplate::from_workspace(&ws, configured);
    Html(template.render().unwrap_or_else(|e| e.to_string()))
}

/// Upload a document into a slot.
pub async fn upload_document(
    State(state): State<AppState>,
    Path(side): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let Some(side) = Side::from_str(&side) else {
        return (StatusCode::NOT_FOUND, "Unknown document slot").into_response();
    };

    let outcome = match read_upload(&mut multipart).await {
        Ok(file) => load_document(&state, file),
        Err(message) => Err(message),
    };

    let mut ws = state.workspace.write().await;
    match outcome {
        Ok(slot) => ws.accept_upload(side, slot),
        Err(message) => {
            warn!("File upload error: {}", message);
            ws.reject_upload(message);
        }
    }

    Redirect::to("/").into_response()
}

/// Empty a slot.
pub async fn clear_document(State(state): State<AppState>, Path(side): Path<String>) -> Response {
    let Some(side) = Side::from_str(&side) else {
        return (StatusCode::NOT_FOUND, "Unknown document slot").into_response();
    };

    state.workspace.write().await.clear(side);
    Redirect::to("/").into_response()
}

/// Compare the loaded documents.
///
/// The comparison runs in its own task so it finishes even when the browser
/// goes away; the page polls until the status leaves `Comparing`. The
/// workspace lock is released while the completion API runs.
pub async fn compare_documents(State(state): State<AppState>) -> Redirect {
    let ticket = state.workspace.write().await.begin_compare();

    if let Some(ticket) = ticket {
        tokio::spawn(async move {
            let outcome = run_comparison(&state.comparison, &ticket).await;
            state.workspace.write().await.finish_compare(ticket, outcome);
        });
    }

    Redirect::to("/")
}

/// Run a comparison and validate it the way the HTTP client would.
async fn run_comparison(
    service: &ComparisonService,
    ticket: &CompareTicket,
) -> Result<ComparisonResult, String> {
    let value = service
        .compare(&ticket.original, &ticket.modified)
        .await
        .map_err(|e| {
            error!("Comparison error: {}", e);
            ApiError(e).to_parts().1.error
        })?;

    parse_result(&value).map_err(|e| e.to_string())
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(NO_FILE_SELECTED.to_string());
        }
        let media_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| e.to_string())?;

        return Ok(UploadedFile::new(name, media_type.as_deref(), bytes.to_vec()));
    }

    Err(NO_FILE_SELECTED.to_string())
}

fn load_document(state: &AppState, file: UploadedFile) -> Result<DocumentSlot, String> {
    if !is_accepted_upload(&file.media_type) {
        return Err(WRONG_UPLOAD_TYPE.to_string());
    }

    let text = state.extractor.extract(&file).map_err(|e| e.to_string())?;

    Ok(DocumentSlot {
        text,
        name: file.name,
        media_type: file.media_type,
    })
}
