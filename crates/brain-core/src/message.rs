//! Conversation turn types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "human" => Ok(Role::User),
            "assistant" | "ai" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A single message in the conversation.
///
/// Turns are never edited after creation. A turn that must be "updated" is
/// re-emitted with the same `id` and merged through [`TurnSequence`].
///
/// [`TurnSequence`]: crate::TurnSequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Stable identifier used for merge-by-id.
    #[serde(default = "new_turn_id")]
    pub id: String,
    /// Author of the turn.
    pub role: Role,
    /// Plain text content.
    #[serde(default)]
    pub content: String,
    /// Display-only parts, carried through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Value>,
}

impl Turn {
    /// Create a turn with a fresh id.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: new_turn_id(),
            role,
            content: content.into(),
            parts: Vec::new(),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Replace the generated id with a caller-supplied one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach display-only parts.
    pub fn with_parts(mut self, parts: Vec<Value>) -> Self {
        self.parts = parts;
        self
    }
}

fn new_turn_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        assert_eq!(Turn::user("hi").role, Role::User);
        assert_eq!(Turn::assistant("hi").role, Role::Assistant);
        assert_eq!(Turn::system("hi").role, Role::System);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Turn::user("same");
        let b = Turn::user("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert_eq!("ai".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!(" system ".parse::<Role>().unwrap(), Role::System);
        assert!("tool".parse::<Role>().is_err());
    }

    #[test]
    fn test_deserialize_without_id_generates_one() {
        let turn: Turn = serde_json::from_str(r#"{"role": "user", "content": "gm"}"#).unwrap();
        assert!(!turn.id.is_empty());
        assert_eq!(turn.content, "gm");
        assert!(turn.parts.is_empty());
    }

    #[test]
    fn test_serialize_omits_empty_parts() {
        let turn = Turn::assistant("hello").with_id("t1");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["id"], "t1");
        assert_eq!(json["role"], "assistant");
        assert!(json.get("parts").is_none());
    }
}
