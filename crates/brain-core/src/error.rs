//! Error types for capability calls.

use thiserror::Error;

/// Errors that can occur while a [`Brain`](crate::Brain) generates a reply.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The backend is temporarily unavailable (quota, overload).
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// The request reached the backend but could not be processed.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// Transport-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),

    /// Missing or invalid configuration (e.g. no API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The backend did not answer in time.
    #[error("model call timed out")]
    Timeout,

    /// The brain has been shut down.
    #[error("brain shut down")]
    ShutDown,
}
