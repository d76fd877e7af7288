//! Specialist domains and their fixed texts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wallet-required message for the portfolio specialist.
pub const PORTFOLIO_WALLET_REQUIRED_MESSAGE: &str = "**Portfolio** requires a connected Base wallet.\n\n\
Connect your Base (or Base Sepolia) wallet to view balances and get yield suggestions. \
You can paste your address here (e.g. `0x...`) or connect via a supported wallet connection.";

/// Wallet-required message for the execution specialist.
pub const EXEC_WALLET_REQUIRED_MESSAGE: &str = "**Execute** (swaps, trades) requires a connected Base wallet.\n\n\
Connect your Base (or Base Sepolia) wallet to run swaps and on-chain actions. \
You can paste your address here (e.g. `0x...`) or connect via a supported wallet.";

/// The closed set of specialist domains a turn can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Balances, holdings, yield, portfolio overview.
    Portfolio,
    /// Sentiment, project analysis, general alpha. Also the fallback.
    #[default]
    Research,
    /// Whale tracking, large flows, smart money.
    Trench,
    /// Charts and technical indicators.
    Ta,
    /// On-chain swaps and trade execution.
    Exec,
}

impl Domain {
    /// Every domain, in routing-table order.
    pub const ALL: [Domain; 5] = [
        Domain::Portfolio,
        Domain::Research,
        Domain::Trench,
        Domain::Ta,
        Domain::Exec,
    ];

    /// Lowercase label; also the token the supervisor answers with.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Portfolio => "portfolio",
            Domain::Research => "research",
            Domain::Trench => "trench",
            Domain::Ta => "ta",
            Domain::Exec => "exec",
        }
    }

    /// Short description used in the routing taxonomy.
    pub fn description(&self) -> &'static str {
        match self {
            Domain::Portfolio => "Balances, holdings, yield, portfolio overview",
            Domain::Research => "Sentiment, project deep-dives, alpha, research",
            Domain::Trench => "Whales, smart money, large flows",
            Domain::Ta => "Charts, TradingView, technical analysis, indicators",
            Domain::Exec => "Swap, trade, execute on-chain",
        }
    }

    /// Parse an exact label, ignoring surrounding whitespace and case.
    pub fn from_label(text: &str) -> Option<Domain> {
        let text = text.trim();
        Domain::ALL
            .into_iter()
            .find(|domain| domain.label().eq_ignore_ascii_case(text))
    }

    /// Whether `text` is exactly one of the domain labels.
    pub fn is_label(text: &str) -> bool {
        Self::from_label(text).is_some()
    }

    /// Whether this domain needs a connected wallet.
    pub fn requires_wallet(&self) -> bool {
        matches!(self, Domain::Portfolio | Domain::Exec)
    }

    /// Reply used when the wallet gate rejects this domain.
    pub fn wallet_required_message(&self) -> Option<&'static str> {
        match self {
            Domain::Portfolio => Some(PORTFOLIO_WALLET_REQUIRED_MESSAGE),
            Domain::Exec => Some(EXEC_WALLET_REQUIRED_MESSAGE),
            _ => None,
        }
    }

    /// System prompt for this domain's model.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Domain::Portfolio => {
                "You are the Portfolio Agent. You help with balances, yield suggestions and \
                 portfolio overview on Base. The user has connected their wallet. Reply concisely."
            }
            Domain::Research => {
                "You are the Research Agent. You help with sentiment, project mining and alpha. \
                 Reply concisely."
            }
            Domain::Trench => {
                "You are the Trench Agent. You help with whale tracking and smart money flows. \
                 Reply concisely."
            }
            Domain::Ta => {
                "You are the TA Analyst. You help with TradingView-style indicators and charts. \
                 Reply concisely."
            }
            Domain::Exec => {
                "You are the Execution Agent. You help with Base on-chain swaps and execution. \
                 The user has connected their wallet. Reply concisely. Never execute a real trade \
                 without explicit confirmation."
            }
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::from_label(s).ok_or_else(|| format!("unknown domain: {}", s.trim()))
    }
}
