use std::sync::Arc;

use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::extraction::GeminiClient;

/// Shared application state, constructed once at startup and cloned into
/// every handler. Handles are passed explicitly; there are no ambient
/// singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub blob_store: Arc<dyn BlobStore>,
    pub extractor: Arc<GeminiClient>,
    pub config: Arc<AppConfig>,
}
