//! Event sink trait and implementations.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::error::OrchestratorError;
use crate::events::StreamEvent;

/// Destination for the events a run produces.
///
/// Abstracted to support different consumers (an HTTP stream, tests, logs).
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event, in order.
    ///
    /// Returns [`OrchestratorError::Cancelled`] once the consumer is gone;
    /// the run stops at that point.
    async fn emit(&self, event: StreamEvent) -> Result<(), OrchestratorError>;
}

/// A sink that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoOpSink;

#[async_trait]
impl EventSink for NoOpSink {
    async fn emit(&self, _event: StreamEvent) -> Result<(), OrchestratorError> {
        Ok(())
    }
}

/// A sink that logs every event, for debugging.
#[derive(Debug, Clone, Default)]
pub struct LoggingSink;

#[async_trait]
impl EventSink for LoggingSink {
    async fn emit(&self, event: StreamEvent) -> Result<(), OrchestratorError> {
        tracing::info!("[{}] {}", event.kind(), event.payload());
        Ok(())
    }
}

/// Forwards events into a bounded channel read by the stream consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Result<StreamEvent, OrchestratorError>>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Result<StreamEvent, OrchestratorError>>) -> Self {
        Self { tx }
    }

    /// Forward a run failure to the consumer.
    pub async fn fail(&self, error: OrchestratorError) -> Result<(), OrchestratorError> {
        self.tx
            .send(Err(error))
            .await
            .map_err(|_| OrchestratorError::Cancelled)
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn emit(&self, event: StreamEvent) -> Result<(), OrchestratorError> {
        self.tx
            .send(Ok(event))
            .await
            .map_err(|_| OrchestratorError::Cancelled)
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<StreamEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events so far.
    pub async fn events(&self) -> Vec<StreamEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventSink for CollectingSink {
    async fn emit(&self, event: StreamEvent) -> Result<(), OrchestratorError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
