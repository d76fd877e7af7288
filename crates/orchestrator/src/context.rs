//! Session context extraction.
//!
//! Derives the session wallet from the conversation itself; there is no
//! separate session token or store.

use tracing::debug;

use crate::state::{OrchestrationState, StateUpdate};
use crate::wallet::find_wallet_address;

/// Refresh the session wallet from the latest user turn.
///
/// The most recent user turn is scanned for an address. If one is found it
/// becomes the wallet; otherwise the current wallet is kept as-is (possibly
/// empty). A later turn without an address never clears a known wallet.
pub fn extract_context(state: &OrchestrationState) -> StateUpdate {
    let found = state
        .messages
        .last_user()
        .and_then(|turn| find_wallet_address(&turn.content));

    match found {
        Some(address) => {
            debug!(wallet = %address, "wallet address found in latest user turn");
            StateUpdate::wallet(address)
        }
        None => StateUpdate::wallet(state.wallet.clone()),
    }
}
