use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// JSON bodies never legitimately approach this; uploads get their own limit.
const JSON_BODY_LIMIT: usize = 2 * 1024 * 1024;

pub fn api_routes() -> OpenApiRouter<AppState> {
    let json = OpenApiRouter::new()
        .routes(routes!(handlers::health::health))
        .routes(routes!(handlers::extract::extract_invoice))
        .routes(routes!(
            handlers::invoice::list_invoices,
            handlers::invoice::create_invoice
        ))
        .routes(routes!(
            handlers::invoice::get_invoice,
            handlers::invoice::update_invoice,
            handlers::invoice::delete_invoice
        ))
        .routes(routes!(handlers::file::download_file))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::file::upload_file))
        .layer(handlers::file::upload_body_limit());

    json.merge(upload)
}
