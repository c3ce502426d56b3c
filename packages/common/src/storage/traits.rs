use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use uuid::Uuid;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Opaque binary blob storage keyed by a store-generated identifier.
///
/// The store owns id generation: callers hand over bytes and get back the id
/// under which the blob can later be retrieved. Ids are never reused, and the
/// store keeps no metadata beyond the bytes themselves.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a byte slice and return the generated blob id.
    async fn put(&self, data: &[u8]) -> Result<Uuid, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.put_stream(reader).await
    }

    /// Store data from an async reader and return the generated blob id.
    async fn put_stream(&self, reader: BoxReader) -> Result<Uuid, StorageError>;

    /// Retrieve all bytes for a blob.
    async fn get(&self, id: Uuid) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(id).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve a blob as a streaming async reader.
    async fn get_stream(&self, id: Uuid) -> Result<BoxReader, StorageError>;
}
