//! HTTP boundary for the Hey Anon chat assistant.
//!
//! Accepts a conversation on `POST /api/chat` and streams the orchestrated
//! reply back as server-sent events.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use orchestrator::Orchestrator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let orchestrator = Arc::new(Orchestrator::from_env()?);
    let state = AppState::new(orchestrator, config.request_timeout);

    let app = routes::router().with_state(state);

    info!(addr = %config.addr, timeout = ?config.request_timeout, "Hey Anon API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
