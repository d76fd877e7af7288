//! Ordered turn list with merge-by-id semantics.
//!
//! A [`TurnSequence`] behaves like an append-only list, except that merging a
//! turn whose id is already present replaces the existing entry in place.
//! Pipeline stages can therefore return "everything so far plus my reply"
//! without duplicating earlier turns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::message::{Role, Turn};

/// Ordered, id-keyed conversation turns.
///
/// # Example
///
/// ```rust
/// use brain_core::{Turn, TurnSequence};
///
/// let first = Turn::user("gm").with_id("a");
/// let mut turns = TurnSequence::from(vec![first.clone()]);
///
/// // Re-merging the same turn does not duplicate it.
/// turns.merge(vec![first, Turn::assistant("gm anon").with_id("b")]);
/// assert_eq!(turns.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Turn>", into = "Vec<Turn>")]
pub struct TurnSequence {
    /// Keyed by turn id; IndexMap keeps insertion order and in-place
    /// replacement on re-insert.
    turns: IndexMap<String, Turn>,
}

impl TurnSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a single turn.
    ///
    /// Returns `true` if the turn replaced an existing entry.
    pub fn push(&mut self, turn: Turn) -> bool {
        // IndexMap::insert keeps the original slot for an existing key.
        self.turns.insert(turn.id.clone(), turn).is_some()
    }

    /// Merge many turns in order.
    pub fn merge(&mut self, turns: impl IntoIterator<Item = Turn>) {
        for turn in turns {
            self.push(turn);
        }
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Turn> {
        self.turns.values()
    }

    /// Look up a turn by id.
    pub fn get(&self, id: &str) -> Option<&Turn> {
        self.turns.get(id)
    }

    /// Most recent turn with the given role.
    pub fn last_with_role(&self, role: Role) -> Option<&Turn> {
        self.iter().rev().find(|turn| turn.role == role)
    }

    /// Most recent user turn.
    pub fn last_user(&self) -> Option<&Turn> {
        self.last_with_role(Role::User)
    }

    /// Clone the turns into a plain list.
    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.values().cloned().collect()
    }
}

impl From<Vec<Turn>> for TurnSequence {
    fn from(turns: Vec<Turn>) -> Self {
        let mut sequence = Self::new();
        sequence.merge(turns);
        sequence
    }
}

impl From<TurnSequence> for Vec<Turn> {
    fn from(sequence: TurnSequence) -> Self {
        sequence.turns.into_values().collect()
    }
}

impl FromIterator<Turn> for TurnSequence {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.merge(iter);
        sequence
    }
}
