//! Error types for orchestrator operations.

use std::time::Duration;

use brain_core::BrainError;
use thiserror::Error;

/// Errors that can end an orchestration run.
///
/// None of these reach the client directly: the stream filter turns the
/// first one into a single recovery reply.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A model call (classification or specialist) failed.
    #[error(transparent)]
    Brain(#[from] BrainError),

    /// The turn could not be routed at all.
    #[error("routing failed: {0}")]
    RoutingFailed(String),

    /// The boundary deadline expired.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The run panicked.
    #[error("internal error: {0}")]
    Panicked(String),

    /// The stream consumer went away; not a failure.
    #[error("stream consumer disconnected")]
    Cancelled,
}
