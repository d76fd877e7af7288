//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Name reported by the health check.
pub const SERVICE_NAME: &str = "web3-portfolio-coach-mvp";

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub service: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        service: SERVICE_NAME,
    })
}
