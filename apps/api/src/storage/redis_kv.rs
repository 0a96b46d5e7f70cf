use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use crate::storage::{KeyValueStore, StoreError};

/// Key-value store backed by Redis string values.
#[derive(Clone)]
pub struct RedisKvStore {
    client: redis::Client,
}

impl RedisKvStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValueStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| StoreError::KeyValue(format!("GET {key} failed: {e}")))?;
        debug!(key, found = value.is_some(), "Redis GET");
        Ok(value)
    }
}
