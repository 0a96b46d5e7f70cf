use std::sync::Arc;

use crate::config::Config;
use crate::storage::{BlobStore, KeyValueStore};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds collaborators only. Normalized feedback is built per request and
/// never stored here.
#[derive(Clone)]
pub struct AppState {
    /// Key-value store holding `resume:<id>` records. Default: Redis.
    pub kv: Arc<dyn KeyValueStore>,
    /// Blob store holding resume PDFs and preview images. Default: S3 / MinIO.
    pub blobs: Arc<dyn BlobStore>,
    pub config: Config,
}
