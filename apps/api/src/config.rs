use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Prefix of resume record keys in the key-value store (`resume:<id>`).
    pub resume_key_prefix: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_region: env_or("S3_REGION", "us-east-1"),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            resume_key_prefix: env_or("RESUME_KEY_PREFIX", DEFAULT_RESUME_KEY_PREFIX),
            port: parse_port(std::env::var("PORT").ok())?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

pub const DEFAULT_RESUME_KEY_PREFIX: &str = "resume:";

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    raw.as_deref()
        .unwrap_or("8080")
        .parse::<u16>()
        .context("PORT must be a valid port number")
}
