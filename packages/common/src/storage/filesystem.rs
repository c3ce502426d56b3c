use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

use super::error::StorageError;
use super::traits::{BlobStore, BoxReader};

/// Filesystem-backed blob store.
///
/// Each stored object gets a fresh UUIDv7 id. Blobs live in a sharded
/// directory layout, `{root}/{first 2 hex chars}/{remaining 30 hex chars}`,
/// and writes go through a temp file plus rename so an interrupted upload
/// never leaves a readable partial blob.
pub struct FilesystemBlobStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store rooted at `root`.
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root, max_size })
    }

    fn blob_path(&self, id: Uuid) -> PathBuf {
        let hex = id.simple().to_string();
        self.root.join(&hex[..2]).join(&hex[2..])
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put_stream(&self, mut reader: BoxReader) -> Result<Uuid, StorageError> {
        let id = Uuid::now_v7();
        let temp_path = self.temp_path();

        let result: Result<(), StorageError> = async {
            let mut temp_file = fs::File::create(&temp_path).await?;
            let mut total_bytes: u64 = 0;
            let mut buf = vec![0u8; 64 * 1024]; // 64KB read buffer

            loop {
                let n = reader.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                total_bytes += n as u64;
                if total_bytes > self.max_size {
                    return Err(StorageError::SizeLimitExceeded {
                        actual: total_bytes,
                        limit: self.max_size,
                    });
                }
                temp_file.write_all(&buf[..n]).await?;
            }

            temp_file.flush().await?;
            drop(temp_file);

            let blob_path = self.blob_path(id);
            if let Some(parent) = blob_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::rename(&temp_path, &blob_path).await?;
            Ok(())
        }
        .await;

        if result.is_err() {
            // Best effort.
            let _ = fs::remove_file(&temp_path).await;
        }

        result.map(|()| id)
    }

    async fn get_stream(&self, id: Uuid) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.blob_path(id)).await {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
