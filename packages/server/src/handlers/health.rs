use axum::Json;

use crate::models::shared::OkBody;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness check",
    responses(
        (status = 200, description = "Service is up", body = OkBody),
    ),
)]
pub async fn health() -> Json<OkBody> {
    Json(OkBody { ok: true })
}
