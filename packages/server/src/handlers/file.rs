use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use common::storage::BoxReader;
use sea_orm::{EntityTrait, Set};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::stored_file;
use crate::error::{AppError, ErrorBody};
use crate::models::file::UploadResponse;
use crate::state::AppState;

pub fn upload_body_limit() -> DefaultBodyLimit {
    // Slightly above the blob cap so the handler gets to reject oversized
    // uploads with a 400 instead of the transport cutting them off.
    DefaultBodyLimit::max(26 * 1024 * 1024)
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Files",
    operation_id = "uploadFile",
    summary = "Upload a document",
    description = "Uploads a file (the `file` multipart field) for later extraction. \
        Returns the id under which the content can be downloaded or extracted.",
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file field or file too large", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut stored: Option<(Uuid, i64)> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(|s| s.to_string());
                content_type = field.content_type().map(|s| s.to_string());
                stored = Some(stream_field_to_store(field, &state).await?);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (id, size) = stored.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let file_name = file_name.unwrap_or_else(|| format!("file-{id}.pdf"));
    let content_type = content_type.or_else(|| {
        mime_guess::from_path(&file_name)
            .first()
            .map(|m| m.to_string())
    });

    let record = stored_file::ActiveModel {
        id: Set(id),
        filename: Set(file_name.clone()),
        content_type: Set(content_type),
        size: Set(size),
        created_at: Set(Utc::now()),
    };
    stored_file::Entity::insert(record).exec(&state.db).await?;

    Ok(Json(UploadResponse {
        file_id: id.to_string(),
        file_name,
    }))
}

#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "Files",
    operation_id = "downloadFile",
    summary = "Download an uploaded document",
    description = "Streams the stored file content. Supports ETag-based caching via If-None-Match; \
        blobs are immutable, so the file id doubles as the ETag.",
    params(("id" = String, Path, description = "File ID (UUID)")),
    responses(
        (status = 200, description = "File content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 400, description = "Malformed file ID", body = ErrorBody),
        (status = 404, description = "File not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(id))]
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let file_id =
        Uuid::parse_str(&id).map_err(|_| AppError::Validation("Invalid file ID".into()))?;

    let record = stored_file::Entity::find_by_id(file_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".into()))?;

    let etag_value = format!("\"{file_id}\"");
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.blob_store.get_stream(file_id).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = record
        .content_type
        .as_deref()
        .unwrap_or("application/pdf");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, record.size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&record.filename),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}

/// Stream a multipart field into blob storage via a temp file. The blob
/// store enforces the configured size cap and rejects oversized content
/// before anything lands under its root.
async fn stream_field_to_store(
    mut field: axum::extract::multipart::Field<'_>,
    state: &AppState,
) -> Result<(Uuid, i64), AppError> {
    let temp_path = std::env::temp_dir().join(format!("invoice-upload-{}", Uuid::new_v4()));
    let max_size = state.config.storage.max_upload_size;

    let result = async {
        let mut temp_file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

        let mut total_size: u64 = 0;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            total_size += chunk.len() as u64;
            if total_size > max_size {
                return Err(AppError::Validation(format!(
                    "File exceeds maximum size of {max_size} bytes"
                )));
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
        }

        temp_file
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;
        drop(temp_file);

        let file = tokio::fs::File::open(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        let id = state.blob_store.put_stream(reader).await?;

        Ok((id, i64::try_from(total_size).unwrap_or(i64::MAX)))
    }
    .await;

    // Best effort.
    let _ = tokio::fs::remove_file(&temp_path).await;

    result
}
