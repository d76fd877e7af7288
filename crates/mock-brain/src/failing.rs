//! Failing brain implementation - every call errors.

use std::sync::atomic::{AtomicUsize, Ordering};

use brain_core::{async_trait, Brain, BrainError, Turn};

/// A brain whose every call fails.
///
/// Useful for testing error propagation and the recovery reply.
#[derive(Debug)]
pub struct FailingBrain {
    message: String,
    calls: AtomicUsize,
}

impl FailingBrain {
    /// Fail with `BrainError::Unavailable(message)`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FailingBrain {
    fn default() -> Self {
        Self::new("quota exceeded")
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn generate(&self, _turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BrainError::Unavailable(self.message.clone()))
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_brain_errors() {
        let brain = FailingBrain::new("boom");
        let err = brain.generate(vec![Turn::user("gm")]).await.unwrap_err();

        assert_eq!(err.to_string(), "model unavailable: boom");
        assert_eq!(brain.calls(), 1);
        assert!(!brain.is_ready().await);
    }
}
