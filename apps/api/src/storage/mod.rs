//! Store collaborators — the key-value store holding resume records and the
//! blob store holding resume documents and preview images.
//!
//! Both are opaque: callers only ever see "value present" or "value absent"
//! (or a transport error they may choose to swallow).

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod redis_kv;
pub mod s3_blob;

#[cfg(test)]
pub mod memory;

pub use redis_kv::RedisKvStore;
pub use s3_blob::S3BlobStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Key-value store connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Key-value store error: {0}")]
    KeyValue(String),

    #[error("Blob store error: {0}")]
    Blob(String),
}

/// Async key-value reads. `Ok(None)` means the key does not exist.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Async blob reads by path. `Ok(None)` means no object at that path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn read(&self, path: &str) -> Result<Option<Bytes>, StoreError>;
}
