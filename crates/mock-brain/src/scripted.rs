//! Scripted brain implementation - fixed reply with call recording.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use brain_core::{async_trait, Brain, BrainError, Turn};

/// A brain that always replies with the same text and records its calls.
///
/// Share it through an `Arc` to assert on [`calls`](Self::calls) after the
/// brain has been handed to the code under test.
#[derive(Debug)]
pub struct ScriptedBrain {
    name: String,
    reply: Option<String>,
    calls: AtomicUsize,
    last_input: Mutex<Option<Vec<Turn>>>,
}

impl ScriptedBrain {
    /// Create a brain that appends an assistant turn with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            name: "ScriptedBrain".to_string(),
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Create a brain that returns its input unchanged (no assistant turn).
    pub fn silent() -> Self {
        Self {
            reply: None,
            ..Self::new("")
        }
    }

    /// Give the brain a distinguishing name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Turns passed to the most recent call.
    pub fn last_input(&self) -> Option<Vec<Turn>> {
        self.last_input
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn generate(&self, mut turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_input.lock() {
            *last = Some(turns.clone());
        }

        if let Some(ref reply) = self.reply {
            turns.push(Turn::assistant(reply.clone()));
        }
        Ok(turns)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
