//! In-memory stores for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::{BlobStore, KeyValueStore, StoreError};

#[derive(Default)]
pub struct MemoryKvStore {
    values: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Bytes>,
}

impl MemoryBlobStore {
    pub fn with(mut self, path: impl Into<String>, data: &'static [u8]) -> Self {
        self.blobs.insert(path.into(), Bytes::from_static(data));
        self
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn read(&self, path: &str) -> Result<Option<Bytes>, StoreError> {
        Ok(self.blobs.get(path).cloned())
    }
}

/// A store whose every read fails.
pub struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        ))))
    }
}

#[async_trait]
impl BlobStore for UnavailableStore {
    async fn read(&self, _path: &str) -> Result<Option<Bytes>, StoreError> {
        Err(StoreError::Blob("connection refused".to_string()))
    }
}
