use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Maximum accepted upload size (25 MiB), enforced before the blob write.
pub const MAX_UPLOAD_SIZE: u64 = 25 * 1024 * 1024;

/// Default base URL for the Gemini generateContent API.
pub const DEFAULT_EXTRACTION_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory of the filesystem blob store.
    pub root: PathBuf,
    pub max_upload_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// API key for the remote extraction model. Required only when the
    /// extraction endpoint is actually invoked.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub extraction: ExtractionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("storage.root", "./data/blobs")?
            .set_default("storage.max_upload_size", MAX_UPLOAD_SIZE as i64)?
            .set_default("extraction.api_url", DEFAULT_EXTRACTION_API_URL)?
            .set_default("extraction.model", "gemini-1.5-flash")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., INVOICE__DATABASE__URL)
            .add_source(Environment::with_prefix("INVOICE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
