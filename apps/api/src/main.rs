mod briefs;
mod config;
mod context;
mod errors;
mod generation;
mod llm_client;
mod models;
mod paths;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::briefs::store::BriefStore;
use crate::config::Config;
use crate::context::loader::ContextLoader;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Briefsmith API v{}", env!("CARGO_PKG_VERSION"));

    // Brief storage directory is created on first start
    let store = BriefStore::new(config.briefs_dir());
    store.ensure_dir().await?;
    info!("Brief store at {}", store.dir().display());

    let context = ContextLoader::new(config.contexts_dir.clone());
    info!("Context documents under {}", config.contexts_dir.display());

    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let cors_origin: HeaderValue = config
        .cors_allowed_origin
        .parse()
        .context("CORS_ALLOWED_ORIGIN must be a valid header value")?;

    let state = AppState {
        store,
        context,
        llm: Arc::new(llm),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(cors_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
