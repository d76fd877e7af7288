//! Chat endpoint: run the orchestrator and stream events as SSE.

use std::convert::Infallible;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use orchestrator::{OrchestrationState, Role, StreamEvent, Turn};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the event closing every stream.
pub const END_EVENT: &str = "end";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub parts: Vec<Value>,
}

impl ChatMessage {
    /// Convert to a turn. Unknown roles yield `None`.
    pub fn to_turn(&self) -> Option<Turn> {
        let role: Role = match self.role.parse() {
            Ok(role) => role,
            Err(err) => {
                warn!(role = %self.role, error = %err, "Skipping message with unknown role");
                return None;
            }
        };

        let text = extract_text(&self.content)
            .or_else(|| text_from_parts(&self.parts))
            .unwrap_or_default();

        let mut turn = Turn::new(role, text).with_parts(self.parts.clone());
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            turn = turn.with_id(id);
        }
        Some(turn)
    }
}

/// Convert the inbound messages into turns, in order.
pub fn to_turns(messages: &[ChatMessage]) -> Vec<Turn> {
    messages.iter().filter_map(ChatMessage::to_turn).collect()
}

fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => join_text(items.iter()),
        _ => None,
    }
}

/// Concatenate the text of UI parts whose `type` is `text`.
fn text_from_parts(parts: &[Value]) -> Option<String> {
    join_text(
        parts
            .iter()
            .filter(|part| part.get("type").and_then(Value::as_str) == Some("text")),
    )
}

fn join_text<'a>(items: impl Iterator<Item = &'a Value>) -> Option<String> {
    let parts: Vec<&str> = items
        .filter_map(|item| item.get("text").and_then(Value::as_str))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(""))
    }
}

/// Wire form of one event.
fn to_sse(event: &StreamEvent) -> Event {
    Event::default()
        .event(event.kind())
        .data(event.payload().to_string())
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let Json(request) = payload?;
    let turns = to_turns(&request.messages);
    info!(messages = request.messages.len(), turns = turns.len(), "Chat request");

    let events = state
        .orchestrator
        .clone()
        .respond(OrchestrationState::new(turns), state.request_timeout)
        .map(|event| Ok::<_, Infallible>(to_sse(&event)))
        .chain(stream::once(async {
            Ok::<_, Infallible>(Event::default().event(END_EVENT).data("[DONE]"))
        }));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
