//! Client-facing stream post-processing.
//!
//! The supervisor's one-word routing label travels through the raw event
//! stream as an ordinary text fragment. Clients must never see it, and a run
//! that fails part-way must still end with a readable reply.

use std::fmt::Display;

use brain_core::Turn;
use futures::stream::{self, Stream, StreamExt};
use tracing::{trace, warn};

use crate::domain::Domain;
use crate::events::StreamEvent;
use crate::specialist::greet;
use crate::state::OrchestrationState;

/// Whether `event` is a routing-label fragment: its trimmed text is exactly
/// one domain label, in any case.
pub fn is_intent_fragment(event: &StreamEvent) -> bool {
    event
        .fragment()
        .is_some_and(|fragment| Domain::is_label(&fragment.text))
}

/// Text of the reply substituted for a failed run.
pub fn recovery_reply(message: &str) -> String {
    greet(&format!(
        "Sorry, I ran into an issue: {}\n\nTry again or rephrase your question.",
        message
    ))
}

/// The single snapshot emitted in place of a failed run. The wallet is reset.
pub fn recovery_event(error: impl Display) -> StreamEvent {
    let reply = Turn::assistant(recovery_reply(&error.to_string()));
    StreamEvent::Values(OrchestrationState::new(vec![reply]))
}

/// Filter a raw run stream for the client.
///
/// Routing-label fragments are dropped; every other event passes through in
/// order. The first `Err` stops the raw stream (dropping it) and is replaced
/// by one [`recovery_event`], after which the output ends.
pub fn filter_supervisor_intent<S, E>(raw: S) -> impl Stream<Item = StreamEvent>
where
    S: Stream<Item = Result<StreamEvent, E>>,
    E: Display,
{
    stream::unfold(Some(Box::pin(raw)), |raw| async move {
        let mut raw = raw?;
        loop {
            match raw.next().await {
                Some(Ok(event)) if is_intent_fragment(&event) => {
                    trace!(kind = event.kind(), "Dropped routing label fragment");
                }
                Some(Ok(event)) => return Some((event, Some(raw))),
                Some(Err(error)) => {
                    warn!(error = %error, "Run failed mid-stream, sending recovery reply");
                    return Some((recovery_event(error), None));
                }
                None => return None,
            }
        }
    })
}
