//! Orchestrator that drives one turn through the pipeline.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use brain_core::{Brain, Turn};
use futures::{FutureExt, Stream};
use gemini_brain::{GeminiBrain, GeminiBrainConfig};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::context::extract_context;
use crate::error::OrchestratorError;
use crate::events::StreamEvent;
use crate::filter::filter_supervisor_intent;
use crate::router::{Router, SUPERVISOR_NODE};
use crate::sink::{ChannelSink, EventSink};
use crate::specialist::Specialists;
use crate::state::OrchestrationState;
use crate::wallet::is_wallet_connected;

/// Node name the context extraction step reports under.
pub const INPUT_PROCESSOR_NODE: &str = "input_processor";

/// Buffered events between a run and its consumer.
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Main orchestrator.
///
/// For every turn the orchestrator:
/// - Refreshes the session wallet from the latest user turn
/// - Asks the supervisor which domain the turn belongs to
/// - Runs exactly one specialist for that domain
/// - Reports state snapshots and text fragments as it goes
///
/// It holds no per-request state; share it behind an `Arc` and start any
/// number of concurrent runs.
pub struct Orchestrator {
    router: Router,
}

impl Orchestrator {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Build from a supervisor model and the specialists.
    pub fn with_brains(supervisor: Arc<dyn Brain>, specialists: Specialists) -> Self {
        Self::new(Router::new(supervisor, specialists))
    }

    /// Build Gemini-backed supervisor and specialists from one shared config.
    ///
    /// Each specialist gets its domain's system prompt; the supervisor gets
    /// the supervisor prompt and temperature zero.
    pub fn from_config(config: GeminiBrainConfig) -> Result<Self, OrchestratorError> {
        let specialists = Specialists::try_build(|domain| {
            let mut specialist_config = config.clone();
            specialist_config.system_prompt = Some(domain.system_prompt().to_string());
            let brain = GeminiBrain::named(domain.label(), specialist_config)?;
            Ok::<Arc<dyn Brain>, OrchestratorError>(Arc::new(brain))
        })?;

        let router = Router::from_config(&config, specialists)?;
        info!(model = %config.model, "Orchestrator ready");
        Ok(Self::new(router))
    }

    /// Create an orchestrator from environment variables.
    pub fn from_env() -> Result<Self, OrchestratorError> {
        Self::from_config(GeminiBrainConfig::from_env())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Run one turn to completion, reporting progress to `sink`.
    ///
    /// Events, in order: the initial snapshot; the extraction node marker and
    /// snapshot; the routing label and reply fragments; the supervisor node
    /// marker and final snapshot. Returns the final state.
    pub async fn run(
        &self,
        mut state: OrchestrationState,
        sink: &dyn EventSink,
    ) -> Result<OrchestrationState, OrchestratorError> {
        debug!(turns = state.messages.len(), "Starting orchestration run");
        sink.emit(StreamEvent::Values(state.clone())).await?;

        let context = extract_context(&state);
        state.apply(context);
        sink.emit(StreamEvent::node_end(INPUT_PROCESSOR_NODE)).await?;
        sink.emit(StreamEvent::Values(state.clone())).await?;

        let (domain, update) = self.router.route(&state, sink).await?;
        state.apply(update);
        sink.emit(StreamEvent::node_end(SUPERVISOR_NODE)).await?;
        sink.emit(StreamEvent::Values(state.clone())).await?;

        info!(
            domain = %domain,
            wallet_connected = is_wallet_connected(&state.wallet),
            turns = state.messages.len(),
            "Orchestration run complete"
        );
        Ok(state)
    }

    /// Start a run for `turns` and return its raw event stream.
    pub fn stream(self: Arc<Self>, turns: Vec<Turn>) -> RunStream {
        self.stream_with_deadline(OrchestrationState::new(turns), None)
    }

    /// Start a run on its own task and return its raw event stream.
    ///
    /// A run failure arrives as a single `Err` item after which the stream
    /// ends. If `deadline` expires first the item is
    /// [`OrchestratorError::Timeout`]; a panic inside the run becomes
    /// [`OrchestratorError::Panicked`]. Dropping the stream aborts the run.
    pub fn stream_with_deadline(
        self: Arc<Self>,
        state: OrchestrationState,
        deadline: Option<Duration>,
    ) -> RunStream {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let task = tokio::spawn(async move {
            let sink = ChannelSink::new(tx);
            let run = async {
                let run = self.run(state, &sink);
                match deadline {
                    Some(limit) => match tokio::time::timeout(limit, run).await {
                        Ok(result) => result,
                        Err(_) => Err(OrchestratorError::Timeout(limit)),
                    },
                    None => run.await,
                }
            };

            let result = match AssertUnwindSafe(run).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(OrchestratorError::Panicked(panic_message(payload.as_ref()))),
            };

            match result {
                Ok(_) => {}
                Err(OrchestratorError::Cancelled) => {
                    debug!("Stream consumer went away, run stopped");
                }
                Err(e) => {
                    warn!(error = %e, "Orchestration run failed");
                    if sink.fail(e).await.is_err() {
                        debug!("Stream consumer went away before the failure was reported");
                    }
                }
            }
        });

        RunStream {
            inner: ReceiverStream::new(rx),
            task,
        }
    }

    /// Start a run and return the client-facing stream: routing labels
    /// removed, failures replaced by one recovery snapshot.
    pub fn respond(
        self: Arc<Self>,
        state: OrchestrationState,
        deadline: Option<Duration>,
    ) -> impl Stream<Item = StreamEvent> + Send + 'static {
        filter_supervisor_intent(self.stream_with_deadline(state, deadline))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "run panicked".to_string()
    }
}

/// Raw event stream of one run.
///
/// Owns the task producing the events and aborts it when dropped.
pub struct RunStream {
    inner: ReceiverStream<Result<StreamEvent, OrchestratorError>>,
    task: JoinHandle<()>,
}

impl Stream for RunStream {
    type Item = Result<StreamEvent, OrchestratorError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for RunStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
