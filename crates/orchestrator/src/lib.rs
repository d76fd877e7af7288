//! Turn orchestrator for the Hey Anon DeFi chat assistant.
//!
//! This crate provides the [`Orchestrator`] type which takes one
//! conversational turn, works out which specialist should answer it, and
//! streams the result back.
//!
//! # Features
//!
//! - Derives the session wallet from the conversation itself
//! - Routes each turn to exactly one of five domain specialists
//! - Gates portfolio and execution behind a connected wallet
//! - Scrubs the supervisor's routing label from the client stream
//! - Replaces a failed run with a single recovery reply
//!
//! # Architecture
//!
//! ```text
//! Inbound turns (from the HTTP boundary)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. input_processor: extract wallet from latest user turn   │
//! │         ↓                                                   │
//! │  2. supervisor: classify turn (one model call)              │
//! │     → portfolio | research | trench | ta | exec             │
//! │     (unrecognized → research)                               │
//! │         ↓                                                   │
//! │  3. specialist: wallet gate, then one model call            │
//! │     → "Hey Anon 👋\n\n<reply>"                              │
//! │         ↓                                                   │
//! │  4. events → bounded channel → RunStream                    │
//! └─────────────────────────────────────────────────────────────┘
//!          ↓
//! filter_supervisor_intent (drop labels, recover on failure)
//!          ↓
//! Client stream
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use orchestrator::{OrchestrationState, Orchestrator, Turn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Arc::new(Orchestrator::from_env()?);
//!
//!     let state = OrchestrationState::new(vec![Turn::user("how is ETH looking?")]);
//!     let mut events = Box::pin(orchestrator.respond(state, None));
//!
//!     while let Some(event) = events.next().await {
//!         println!("{}: {}", event.kind(), event.payload());
//!     }
//!     Ok(())
//! }
//! ```

mod context;
mod domain;
mod error;
mod events;
mod filter;
mod orchestrator;
mod router;
mod sink;
mod specialist;
mod state;
mod wallet;

// Public exports
pub use context::extract_context;
pub use domain::{Domain, EXEC_WALLET_REQUIRED_MESSAGE, PORTFOLIO_WALLET_REQUIRED_MESSAGE};
pub use error::OrchestratorError;
pub use events::{MessageFragment, StreamEvent};
pub use filter::{filter_supervisor_intent, is_intent_fragment, recovery_event, recovery_reply};
pub use orchestrator::{Orchestrator, RunStream, EVENT_CHANNEL_CAPACITY, INPUT_PROCESSOR_NODE};
pub use router::{
    load_supervisor_prompt, parse_domain, supervisor_config, Classification, Router,
    DEFAULT_SUPERVISOR_PROMPT_FILE, DEFAULT_SUPERVISOR_SYSTEM_PROMPT, SUPERVISOR_NODE,
};
pub use sink::{ChannelSink, CollectingSink, EventSink, LoggingSink, NoOpSink};
pub use specialist::{
    greet, Specialist, Specialists, DEFAULT_WALLET_REQUIRED_MESSAGE, GREETING, NO_RESPONSE_TEXT,
};
pub use state::{OrchestrationState, StateUpdate};
pub use wallet::{find_wallet_address, is_wallet_connected};

// Re-export commonly used types from dependencies
pub use brain_core::{Brain, BrainError, Role, Turn, TurnSequence};
pub use gemini_brain::GeminiBrainConfig;
