//! Route handlers for the chat API.

pub mod chat;
pub mod health;
pub mod portfolio;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Seeded analytics
        .route("/portfolio/demo", get(portfolio::portfolio_demo))
        // Chat
        .route("/api/chat", post(chat::chat))
}
