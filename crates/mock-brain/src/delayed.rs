//! Latency wrapper for deadline and cancellation tests.

use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, Turn};

/// Holds every call for a fixed latency before handing it to the wrapped brain.
///
/// The wait happens before the inner call, so a run aborted during the wait
/// never reaches the inner brain.
pub struct DelayedBrain<B: Brain> {
    inner: B,
    latency: Duration,
    label: String,
}

impl<B: Brain> DelayedBrain<B> {
    pub fn new(inner: B, latency: Duration) -> Self {
        let label = format!("Delayed({})", inner.name());
        Self {
            inner,
            latency,
            label,
        }
    }

    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    pub fn with_secs(inner: B, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }
}

#[async_trait]
impl<B: Brain> Brain for DelayedBrain<B> {
    async fn generate(&self, turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.inner.generate(turns).await
    }

    fn name(&self) -> &str {
        &self.label
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{EchoBrain, ScriptedBrain};

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_latency() {
        let brain = DelayedBrain::with_secs(EchoBrain::new(), 3);
        let started = tokio::time::Instant::now();

        let out = brain.generate(vec![Turn::user("wen moon")]).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(3));
        assert_eq!(out.last().map(|t| t.content.as_str()), Some("wen moon"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_cuts_off_before_inner_call() {
        let inner = Arc::new(ScriptedBrain::new("late"));
        let brain = DelayedBrain::with_millis(inner.clone(), 500);

        let result = tokio::time::timeout(
            Duration::from_millis(100),
            brain.generate(vec![Turn::user("gm")]),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(inner.calls(), 0);
    }

    #[test]
    fn test_name_reports_wrapped_brain() {
        let brain = DelayedBrain::with_millis(EchoBrain::new(), 0);
        assert_eq!(brain.name(), "Delayed(EchoBrain)");
    }
}
