//! Supervisor routing: classify the latest user turn into one domain and
//! dispatch it to that domain's specialist.

use std::env;
use std::sync::Arc;

use brain_core::{hash_prompt, load_prompt_file, Brain, Role};
use gemini_brain::{GeminiBrain, GeminiBrainConfig};
use tracing::{debug, info, trace, warn};

use crate::domain::Domain;
use crate::error::OrchestratorError;
use crate::events::{MessageFragment, StreamEvent};
use crate::sink::EventSink;
use crate::specialist::Specialists;
use crate::state::{OrchestrationState, StateUpdate};

/// Default path for the supervisor prompt file.
pub const DEFAULT_SUPERVISOR_PROMPT_FILE: &str = "SUPERVISOR_PROMPT.md";

/// Node name the routing step reports under.
pub const SUPERVISOR_NODE: &str = "supervisor";

/// Default supervisor system prompt (fallback if no override is found).
pub const DEFAULT_SUPERVISOR_SYSTEM_PROMPT: &str = r#"You are the orchestrator for a DeFi chat assistant. Route the user to the right specialist:
- **portfolio**: balances, holdings, yield, portfolio overview (use when user asks about their portfolio or holdings).
- **research**: sentiment, project deep-dives, alpha, research (use for research and sentiment questions).
- **trench**: whales, smart money, large flows (use for whale tracking and smart money).
- **ta**: charts, TradingView, technical analysis, indicators (use for TA and charts).
- **exec**: swap, trade, execute on-chain (use for execution and swaps).
Pick exactly one specialist per turn. If unclear, prefer research.

Answer with the specialist's name only, in lowercase, with no other text."#;

/// Load the supervisor system prompt.
///
/// Priority:
/// 1. `SUPERVISOR_SYSTEM_PROMPT` env var (if set)
/// 2. Contents of prompt file (`SUPERVISOR_PROMPT_FILE` or default `SUPERVISOR_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_supervisor_prompt() -> String {
    if let Ok(prompt) = env::var("SUPERVISOR_SYSTEM_PROMPT") {
        info!("Using supervisor prompt from SUPERVISOR_SYSTEM_PROMPT env var");
        return prompt;
    }

    let prompt_file = env::var("SUPERVISOR_PROMPT_FILE")
        .unwrap_or_else(|_| DEFAULT_SUPERVISOR_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded supervisor prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default supervisor prompt");
    DEFAULT_SUPERVISOR_SYSTEM_PROMPT.to_string()
}

/// Derive the supervisor's model config from the shared one.
pub fn supervisor_config(base: &GeminiBrainConfig) -> GeminiBrainConfig {
    let mut config = base.clone();
    config.system_prompt = Some(load_supervisor_prompt());
    config.temperature = Some(0.0); // Deterministic
    config
}

/// Map a raw classifier reply onto a domain.
///
/// Surrounding whitespace, markdown and punctuation are stripped and case is
/// ignored; the remainder must be exactly one label.
pub fn parse_domain(raw: &str) -> Option<Domain> {
    let normalized = raw
        .trim()
        .trim_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_ascii_lowercase();
    Domain::from_label(&normalized)
}

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Resolved domain; research when the reply was not recognized.
    pub domain: Domain,
    /// The classifier's reply as received.
    pub raw: String,
    /// Whether `raw` named a domain.
    pub recognized: bool,
}

/// Router that classifies each turn with a dedicated model and dispatches it
/// to exactly one specialist.
///
/// The router holds no per-request state and is shared across runs.
pub struct Router {
    brain: Arc<dyn Brain>,
    specialists: Specialists,
    prompt_hash: Option<String>,
}

impl Router {
    /// Create a router from a classifier model and the specialists.
    pub fn new(brain: Arc<dyn Brain>, specialists: Specialists) -> Self {
        Self {
            brain,
            specialists,
            prompt_hash: None,
        }
    }

    /// Create a Gemini-backed supervisor from the shared model config.
    pub fn from_config(
        config: &GeminiBrainConfig,
        specialists: Specialists,
    ) -> Result<Self, OrchestratorError> {
        let config = supervisor_config(config);
        let brain = GeminiBrain::named(SUPERVISOR_NODE, config).map_err(|e| {
            OrchestratorError::RoutingFailed(format!(
                "Failed to initialize supervisor brain: {}",
                e
            ))
        })?;

        let prompt_hash = brain.system_prompt_hash().map(str::to_string);
        if let Some(ref hash) = prompt_hash {
            info!("Supervisor prompt fingerprint: {}", hash);
        }

        Ok(Self {
            brain: Arc::new(brain),
            specialists,
            prompt_hash,
        })
    }

    /// Get the supervisor prompt fingerprint, when known.
    pub fn prompt_hash(&self) -> Option<&str> {
        self.prompt_hash.as_deref()
    }

    /// Classify the latest user turn, with history, into one domain.
    ///
    /// Unrecognized or empty replies resolve to research. Model errors are
    /// returned; there is no retry.
    pub async fn classify(
        &self,
        state: &OrchestrationState,
    ) -> Result<Classification, OrchestratorError> {
        if state.messages.last_user().is_none() {
            return Err(OrchestratorError::RoutingFailed(
                "no user turn to route".to_string(),
            ));
        }

        let input = state.messages.to_vec();
        let sent = input.len();
        let output = self.brain.generate(input).await?;

        let raw = output
            .iter()
            .skip(sent)
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.clone())
            .unwrap_or_default();

        trace!(raw_response = %raw, "SUPERVISOR_RAW_RESPONSE");

        let classification = match parse_domain(&raw) {
            Some(domain) => Classification {
                domain,
                raw,
                recognized: true,
            },
            None => {
                warn!(raw_response = %raw, "Unrecognized supervisor reply, falling back to research");
                Classification {
                    domain: Domain::Research,
                    raw,
                    recognized: false,
                }
            }
        };

        info!(domain = %classification.domain, "Routed turn");
        Ok(classification)
    }

    /// Classify and dispatch one turn.
    ///
    /// Emits the routing label as a fragment before the specialist's reply
    /// fragment. Exactly one specialist runs.
    pub async fn route(
        &self,
        state: &OrchestrationState,
        sink: &dyn EventSink,
    ) -> Result<(Domain, StateUpdate), OrchestratorError> {
        let classification = self.classify(state).await?;
        let domain = classification.domain;

        sink.emit(StreamEvent::Message(MessageFragment::assistant(
            domain.label(),
            SUPERVISOR_NODE,
        )))
        .await?;

        let specialist = self.specialists.get(domain);
        debug!(domain = %domain, gated = specialist.requires_wallet(), "Dispatching to specialist");
        let update = specialist.run(state).await?;

        if let Some(reply) = update.last_turn() {
            sink.emit(StreamEvent::Message(MessageFragment::from_turn(
                reply,
                domain.label(),
            )))
            .await?;
        }

        Ok((domain, update))
    }
}
