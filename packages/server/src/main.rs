use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemBlobStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::extraction::GeminiClient;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("failed to connect to database")?;

    let blob_store = FilesystemBlobStore::new(
        config.storage.root.clone(),
        config.storage.max_upload_size,
    )
    .await
    .context("failed to initialize blob storage")?;

    let extractor = GeminiClient::new(&config.extraction);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        db,
        blob_store: Arc::new(blob_store),
        extractor: Arc::new(extractor),
        config: Arc::new(config),
    };

    let app = server::build_router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
