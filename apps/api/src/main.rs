mod config;
mod errors;
mod feedback;
mod review;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{RedisKvStore, S3BlobStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: fails on missing required env vars
    let config = Config::from_env()?;

    // Structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Review API v{}", env!("CARGO_PKG_VERSION"));

    // Key-value store (resume records)
    let redis = redis::Client::open(config.redis_url.clone()).context("Invalid REDIS_URL")?;
    info!("Redis client initialized");

    // Blob store (resume PDFs, preview images)
    let blobs = S3BlobStore::from_config(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let state = AppState {
        kv: Arc::new(RedisKvStore::new(redis)),
        blobs: Arc::new(blobs),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
