use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Blob id under which the file can be retrieved and extracted.
    pub file_id: String,
    /// Original upload filename.
    pub file_name: String,
}
