use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Directory under the contexts root that holds one JSON file per brief.
pub const BRIEFS_SUBDIR: &str = "product_briefs";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// Root holding `product_briefs/`, `instructions/` and `system_roles/`.
    pub contexts_dir: PathBuf,
    pub cors_allowed_origin: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            contexts_dir: std::env::var("CONTEXTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("contexts")),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn briefs_dir(&self) -> PathBuf {
        self.contexts_dir.join(BRIEFS_SUBDIR)
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}
