//! Specialist handlers: one model capability per domain, optionally gated
//! behind a connected wallet.

use std::sync::Arc;

use brain_core::{Brain, BrainError, Role, Turn};
use tracing::{debug, info};

use crate::domain::Domain;
use crate::state::{OrchestrationState, StateUpdate};
use crate::wallet::is_wallet_connected;

/// Prefix on every assistant reply.
pub const GREETING: &str = "Hey Anon 👋";

/// Used when the model produced no usable text.
pub const NO_RESPONSE_TEXT: &str = "I couldn't generate a response for that.";

/// Used when a gated specialist has no message of its own.
pub const DEFAULT_WALLET_REQUIRED_MESSAGE: &str = "A wallet is required.";

/// Prefix `body` with the greeting.
pub fn greet(body: &str) -> String {
    format!("{}\n\n{}", GREETING, body)
}

/// A handler for one domain.
#[derive(Clone)]
pub struct Specialist {
    domain: Domain,
    brain: Arc<dyn Brain>,
    requires_wallet: bool,
    wallet_required_message: Option<String>,
}

impl std::fmt::Debug for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specialist")
            .field("domain", &self.domain)
            .field("brain", &self.brain.name())
            .field("requires_wallet", &self.requires_wallet)
            .finish()
    }
}

impl Specialist {
    /// An ungated specialist.
    pub fn new(domain: Domain, brain: Arc<dyn Brain>) -> Self {
        Self {
            domain,
            brain,
            requires_wallet: false,
            wallet_required_message: None,
        }
    }

    /// A specialist configured the standard way for `domain`: portfolio and
    /// exec are gated with their own wallet-required messages.
    pub fn for_domain(domain: Domain, brain: Arc<dyn Brain>) -> Self {
        let specialist = Self::new(domain, brain);
        if domain.requires_wallet() {
            specialist.require_wallet(domain.wallet_required_message())
        } else {
            specialist
        }
    }

    /// Gate this specialist behind a connected wallet.
    pub fn require_wallet(mut self, message: Option<&str>) -> Self {
        self.requires_wallet = true;
        self.wallet_required_message = message.map(str::to_string);
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn requires_wallet(&self) -> bool {
        self.requires_wallet
    }

    /// Produce this specialist's reply for `state`.
    ///
    /// Returns the previous turns plus exactly one new assistant turn. A
    /// gated specialist without a connected wallet answers with its
    /// wallet-required message and never calls the model. Model errors are
    /// returned unchanged.
    pub async fn run(&self, state: &OrchestrationState) -> Result<StateUpdate, BrainError> {
        let mut turns = state.messages.to_vec();

        if self.requires_wallet && !is_wallet_connected(&state.wallet) {
            info!(domain = %self.domain, "wallet not connected, skipping model call");
            let message = self
                .wallet_required_message
                .as_deref()
                .unwrap_or(DEFAULT_WALLET_REQUIRED_MESSAGE);
            turns.push(Turn::assistant(greet(message)));
            return Ok(StateUpdate::messages(turns));
        }

        debug!(domain = %self.domain, brain = self.brain.name(), turns = turns.len(), "calling specialist model");
        let output = self.brain.generate(turns.clone()).await?;

        let text = output
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.trim())
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_RESPONSE_TEXT);

        turns.push(Turn::assistant(greet(text)));
        Ok(StateUpdate::messages(turns))
    }
}

/// The five specialists, one per domain.
#[derive(Debug, Clone)]
pub struct Specialists {
    portfolio: Specialist,
    research: Specialist,
    trench: Specialist,
    ta: Specialist,
    exec: Specialist,
}

impl Specialists {
    /// Build every specialist with [`Specialist::for_domain`], asking
    /// `brain_for` for each domain's model.
    pub fn build<F>(mut brain_for: F) -> Self
    where
        F: FnMut(Domain) -> Arc<dyn Brain>,
    {
        Self {
            portfolio: Specialist::for_domain(Domain::Portfolio, brain_for(Domain::Portfolio)),
            research: Specialist::for_domain(Domain::Research, brain_for(Domain::Research)),
            trench: Specialist::for_domain(Domain::Trench, brain_for(Domain::Trench)),
            ta: Specialist::for_domain(Domain::Ta, brain_for(Domain::Ta)),
            exec: Specialist::for_domain(Domain::Exec, brain_for(Domain::Exec)),
        }
    }

    /// Like [`build`](Self::build) for constructors that can fail.
    pub fn try_build<F, E>(mut brain_for: F) -> Result<Self, E>
    where
        F: FnMut(Domain) -> Result<Arc<dyn Brain>, E>,
    {
        Ok(Self {
            portfolio: Specialist::for_domain(Domain::Portfolio, brain_for(Domain::Portfolio)?),
            research: Specialist::for_domain(Domain::Research, brain_for(Domain::Research)?),
            trench: Specialist::for_domain(Domain::Trench, brain_for(Domain::Trench)?),
            ta: Specialist::for_domain(Domain::Ta, brain_for(Domain::Ta)?),
            exec: Specialist::for_domain(Domain::Exec, brain_for(Domain::Exec)?),
        })
    }

    /// Every domain served by the same model.
    pub fn shared(brain: Arc<dyn Brain>) -> Self {
        Self::build(|_| brain.clone())
    }

    pub fn get(&self, domain: Domain) -> &Specialist {
        match domain {
            Domain::Portfolio => &self.portfolio,
            Domain::Research => &self.research,
            Domain::Trench => &self.trench,
            Domain::Ta => &self.ta,
            Domain::Exec => &self.exec,
        }
    }

    /// Replace the specialist for its domain.
    pub fn with(mut self, specialist: Specialist) -> Self {
        let slot = match specialist.domain {
            Domain::Portfolio => &mut self.portfolio,
            Domain::Research => &mut self.research,
            Domain::Trench => &mut self.trench,
            Domain::Ta => &mut self.ta,
            Domain::Exec => &mut self.exec,
        };
        *slot = specialist;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EXEC_WALLET_REQUIRED_MESSAGE, PORTFOLIO_WALLET_REQUIRED_MESSAGE};
    use mock_brain::{FailingBrain, ScriptedBrain};

    const WALLET: &str = "0xABCDEF0123456789abcdef0123456789ABCDEF00";

    fn state(text: &str) -> OrchestrationState {
        OrchestrationState::new(vec![Turn::user(text).with_id("u1")])
    }

    #[tokio::test]
    async fn test_gated_specialist_refuses_without_wallet() {
        for (domain, message) in [
            (Domain::Portfolio, PORTFOLIO_WALLET_REQUIRED_MESSAGE),
            (Domain::Exec, EXEC_WALLET_REQUIRED_MESSAGE),
        ] {
            let brain = Arc::new(ScriptedBrain::new("should not run"));
            let specialist = Specialist::for_domain(domain, brain.clone());

            let update = specialist.run(&state("show my balances")).await.unwrap();

            assert_eq!(brain.calls(), 0);
            assert_eq!(update.messages.len(), 2);
            let reply = update.last_turn().unwrap();
            assert_eq!(reply.role, Role::Assistant);
            assert!(reply.content.starts_with("Hey Anon 👋\n\n"));
            assert!(reply.content.contains(message));
        }
    }

    #[tokio::test]
    async fn test_gated_specialist_rejects_malformed_wallet() {
        let brain = Arc::new(ScriptedBrain::new("should not run"));
        let specialist = Specialist::for_domain(Domain::Exec, brain.clone());
        let state = state("swap 1 eth").with_wallet(format!("0x{}", "a".repeat(39)));

        specialist.run(&state).await.unwrap();
        assert_eq!(brain.calls(), 0);
    }

    #[tokio::test]
    async fn test_gated_specialist_runs_with_wallet() {
        let brain = Arc::new(ScriptedBrain::new("You hold 2 ETH."));
        let specialist = Specialist::for_domain(Domain::Portfolio, brain.clone());

        let update = specialist
            .run(&state("show my balances").with_wallet(WALLET))
            .await
            .unwrap();

        assert_eq!(brain.calls(), 1);
        assert_eq!(
            update.last_turn().unwrap().content,
            "Hey Anon 👋\n\nYou hold 2 ETH."
        );
    }

    #[tokio::test]
    async fn test_default_wallet_message() {
        let brain = Arc::new(ScriptedBrain::new("unused"));
        let specialist = Specialist::new(Domain::Trench, brain).require_wallet(None);

        let update = specialist.run(&state("whales?")).await.unwrap();
        assert_eq!(
            update.last_turn().unwrap().content,
            "Hey Anon 👋\n\nA wallet is required."
        );
    }

    #[tokio::test]
    async fn test_reply_is_trimmed_and_greeted() {
        let specialist = Specialist::for_domain(
            Domain::Research,
            Arc::new(ScriptedBrain::new("  Sentiment is mixed.\n")),
        );

        let update = specialist.run(&state("how is ETH doing?")).await.unwrap();

        assert_eq!(update.messages[0].id, "u1");
        assert_eq!(
            update.last_turn().unwrap().content,
            "Hey Anon 👋\n\nSentiment is mixed."
        );
    }

    #[tokio::test]
    async fn test_fallback_text_when_model_is_silent() {
        let specialist = Specialist::for_domain(Domain::Ta, Arc::new(ScriptedBrain::silent()));

        let update = specialist.run(&state("chart BTC")).await.unwrap();
        assert_eq!(
            update.last_turn().unwrap().content,
            "Hey Anon 👋\n\nI couldn't generate a response for that."
        );
    }

    #[tokio::test]
    async fn test_fallback_text_when_reply_is_blank() {
        let specialist = Specialist::for_domain(Domain::Ta, Arc::new(ScriptedBrain::new("   ")));

        let update = specialist.run(&state("chart BTC")).await.unwrap();
        assert!(update
            .last_turn()
            .unwrap()
            .content
            .ends_with(NO_RESPONSE_TEXT));
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        let specialist = Specialist::for_domain(
            Domain::Research,
            Arc::new(FailingBrain::new("quota exceeded")),
        );

        let err = specialist.run(&state("gm")).await.unwrap_err();
        assert!(matches!(err, BrainError::Unavailable(ref msg) if msg == "quota exceeded"));
    }

    #[test]
    fn test_specialists_get_matches_domain() {
        let specialists = Specialists::shared(Arc::new(ScriptedBrain::new("ok")));

        for domain in Domain::ALL {
            let specialist = specialists.get(domain);
            assert_eq!(specialist.domain(), domain);
            assert_eq!(specialist.requires_wallet(), domain.requires_wallet());
        }
    }

    #[tokio::test]
    async fn test_specialists_with_replaces_one_slot() {
        let trench = Arc::new(ScriptedBrain::new("whales are buying"));
        let specialists = Specialists::shared(Arc::new(ScriptedBrain::new("generic")))
            .with(Specialist::new(Domain::Trench, trench.clone()));

        let update = specialists
            .get(Domain::Trench)
            .run(&state("whales?"))
            .await
            .unwrap();

        assert_eq!(trench.calls(), 1);
        assert!(update.last_turn().unwrap().content.ends_with("whales are buying"));
    }
}
