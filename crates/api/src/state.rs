//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use orchestrator::Orchestrator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator shared by every request.
    pub orchestrator: Arc<Orchestrator>,
    /// Deadline applied to each run.
    pub request_timeout: Option<Duration>,
}

impl AppState {
    /// Create new application state.
    pub fn new(orchestrator: Arc<Orchestrator>, request_timeout: Option<Duration>) -> Self {
        Self {
            orchestrator,
            request_timeout,
        }
    }
}
