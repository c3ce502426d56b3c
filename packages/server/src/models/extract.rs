use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;

/// Model selectors accepted by the extraction endpoint.
pub const SUPPORTED_MODELS: &[&str] = &["gemini"];

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Blob id of a previously uploaded file.
    pub file_id: String,
    /// Optional model selector; only `"gemini"` is currently supported.
    pub model: Option<String>,
}

pub fn validate_extract_request(req: &ExtractRequest) -> Result<(), AppError> {
    if req.file_id.trim().is_empty() {
        return Err(AppError::Validation(
            "fileId must be a non-empty string".into(),
        ));
    }
    if let Some(ref model) = req.model {
        if !SUPPORTED_MODELS.contains(&model.as_str()) {
            return Err(AppError::Validation(format!(
                "model must be one of: {}",
                SUPPORTED_MODELS.join(", ")
            )));
        }
    }
    Ok(())
}
