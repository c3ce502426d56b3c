pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invoice Digitizer API",
        version = "1.0.0",
        description = "Upload PDF invoices, extract structured fields with a vision model, \
            and manage the resulting invoice records"
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Files", description = "PDF upload and retrieval"),
        (name = "Extraction", description = "Vision-model field extraction"),
        (name = "Invoices", description = "Invoice record CRUD"),
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::api_routes())
        .split_for_parts();

    router
        .with_state(state)
        .layer(CorsLayer::permissive())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
