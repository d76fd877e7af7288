//! Per-request orchestration state.

use brain_core::{Turn, TurnSequence};
use serde::{Deserialize, Serialize};

/// Everything one orchestration run knows: the conversation and the
/// session wallet.
///
/// A fresh instance is built for every request and owned by that run only.
/// This is also the shape of every `values` snapshot on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationState {
    /// Conversation turns, merged by id.
    #[serde(default)]
    pub messages: TurnSequence,
    /// Session wallet address, empty when unknown.
    #[serde(default)]
    pub wallet: String,
}

impl OrchestrationState {
    /// Start a run from the inbound turns with an empty wallet.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            messages: TurnSequence::from(turns),
            wallet: String::new(),
        }
    }

    /// Seed the wallet (e.g. from a caller that already knows it).
    pub fn with_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = wallet.into();
        self
    }

    /// Fold a stage's partial update into the state.
    pub fn apply(&mut self, update: StateUpdate) {
        self.messages.merge(update.messages);
        if let Some(wallet) = update.wallet {
            self.wallet = wallet;
        }
    }
}

/// A partial update returned by a pipeline stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    /// Turns to merge (by id) into the conversation.
    pub messages: Vec<Turn>,
    /// Replacement wallet value, if the stage set one.
    pub wallet: Option<String>,
}

impl StateUpdate {
    /// An update carrying only turns.
    pub fn messages(messages: Vec<Turn>) -> Self {
        Self {
            messages,
            wallet: None,
        }
    }

    /// An update carrying only a wallet value.
    pub fn wallet(wallet: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            wallet: Some(wallet.into()),
        }
    }

    /// Most recent turn in the update.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.messages.last()
    }
}
