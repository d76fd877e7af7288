//! Wallet address detection and the wallet precondition gate.

use std::sync::LazyLock;

use regex::Regex;

/// An EVM address anywhere in free text.
static ADDRESS_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[a-fA-F0-9]{40}").expect("valid address pattern"));

/// A string that is exactly one EVM address.
static ADDRESS_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid address pattern"));

/// Find the first wallet address in `text`, case preserved.
pub fn find_wallet_address(text: &str) -> Option<&str> {
    ADDRESS_IN_TEXT.find(text).map(|m| m.as_str())
}

/// Whether `candidate` is a connected wallet: after trimming, exactly `0x`
/// followed by 40 hex digits.
///
/// ```rust
/// use orchestrator::is_wallet_connected;
///
/// assert!(is_wallet_connected(&format!("0x{}", "a".repeat(40))));
/// assert!(!is_wallet_connected(""));
/// ```
pub fn is_wallet_connected(candidate: &str) -> bool {
    let candidate = candidate.trim();
    !candidate.is_empty() && ADDRESS_EXACT.is_match(candidate)
}
