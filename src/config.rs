use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::upload::IMGBB_UPLOAD_URL;

const DEFAULT_IMGBB_API_KEY: &str = "YOUR_DEFAULT_IMGBB_API_KEY";

/// Process-wide settings read once at startup. Every value has a fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub imgbb_api_key: String,
    pub imgbb_upload_url: String,
    pub upload_timeout: Duration,
    /// Location of the JSONL record store.
    pub record_store_path: PathBuf,
    pub output_dir: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let upload_timeout_secs = get("UPLOAD_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("UPLOAD_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            imgbb_api_key: get("IMGBB_API_KEY", DEFAULT_IMGBB_API_KEY),
            imgbb_upload_url: get("IMGBB_UPLOAD_URL", IMGBB_UPLOAD_URL),
            upload_timeout: Duration::from_secs(upload_timeout_secs),
            record_store_path: PathBuf::from(get("RECORD_STORE_PATH", "data/images.jsonl")),
            output_dir: PathBuf::from(get("OUTPUT_DIR", "output")),
            port: get("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
        })
    }
}
