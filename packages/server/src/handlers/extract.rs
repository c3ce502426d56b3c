use axum::Json;
use axum::extract::State;
use common::storage::StorageError;
use sea_orm::EntityTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::stored_file;
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::extract::{ExtractRequest, validate_extract_request};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/extract",
    tag = "Extraction",
    operation_id = "extractInvoice",
    summary = "Extract invoice data from an uploaded file",
    description = "Sends a previously uploaded document to the vision model and returns the \
        structured invoice JSON it produces. The result is not persisted; clients review it \
        and create an invoice record explicitly.",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Extracted invoice data"),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 500, description = "Extraction failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, req), fields(file_id = %req.file_id))]
pub async fn extract_invoice(
    State(state): State<AppState>,
    AppJson(req): AppJson<ExtractRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_extract_request(&req)?;

    let file_id = Uuid::parse_str(&req.file_id)
        .map_err(|_| AppError::Validation("Invalid file ID".into()))?;

    // An unresolvable file id, whether the metadata row or the blob itself
    // is gone, fails the extraction (500), never a 404.
    let record = stored_file::Entity::find_by_id(file_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Upstream(format!("File not found: {file_id}")))?;

    let document = state.blob_store.get(file_id).await.map_err(|e| match e {
        StorageError::NotFound(id) => AppError::Upstream(format!("Stored content missing: {id}")),
        other => AppError::from(other),
    })?;

    let mime_type = record.content_type.as_deref().unwrap_or("application/pdf");

    let extracted = state
        .extractor
        .extract_invoice(&document, mime_type)
        .await?;

    Ok(Json(extracted))
}
