//! Events observed while a run is in flight.

use brain_core::{Role, Turn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::state::OrchestrationState;

/// A piece of text attributed to a turn and the pipeline node that produced
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageFragment {
    pub id: String,
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

impl MessageFragment {
    /// A fragment carrying a whole turn's text.
    pub fn from_turn(turn: &Turn, node: impl Into<String>) -> Self {
        Self {
            id: turn.id.clone(),
            role: turn.role,
            text: turn.content.clone(),
            node: Some(node.into()),
        }
    }

    /// A fragment with a fresh id.
    pub fn assistant(text: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            text: text.into(),
            node: Some(node.into()),
        }
    }
}

/// One item of the run's event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Full state snapshot.
    Values(OrchestrationState),
    /// Text fragment.
    Message(MessageFragment),
    /// Anything else, e.g. node lifecycle markers.
    Other(Value),
}

impl StreamEvent {
    /// Wire event name.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Values(_) => "values",
            StreamEvent::Message(_) => "messages",
            StreamEvent::Other(_) => "other",
        }
    }

    pub fn fragment(&self) -> Option<&MessageFragment> {
        match self {
            StreamEvent::Message(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// JSON body for the wire.
    pub fn payload(&self) -> Value {
        let payload = match self {
            StreamEvent::Values(state) => serde_json::to_value(state),
            StreamEvent::Message(fragment) => serde_json::to_value(fragment),
            StreamEvent::Other(value) => return value.clone(),
        };
        payload.unwrap_or(Value::Null)
    }

    /// Marker emitted when a pipeline node finishes.
    pub fn node_end(node: &str) -> Self {
        StreamEvent::Other(json!({ "event": "node_end", "node": node }))
    }
}

impl From<OrchestrationState> for StreamEvent {
    fn from(state: OrchestrationState) -> Self {
        StreamEvent::Values(state)
    }
}

impl From<MessageFragment> for StreamEvent {
    fn from(fragment: MessageFragment) -> Self {
        StreamEvent::Message(fragment)
    }
}
