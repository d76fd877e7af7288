//! The Brain trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::Turn;

/// An opaque model capability: maps a conversation to a continued
/// conversation.
///
/// Implementations receive the turns so far and return them with the model's
/// reply appended (usually a single assistant turn). Any system prompt or
/// tool configuration belongs to the implementation, not to the caller.
///
/// This trait is object-safe and can be used as `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Generate a continuation of `turns`.
    async fn generate(&self, turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError>;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;

    /// Check if the brain is ready to accept calls.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: Brain + ?Sized> Brain for Arc<T> {
    async fn generate(&self, turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        (**self).generate(turns).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}
