//! End-to-end runs through the orchestrator with mock models.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use mock_brain::{async_trait, DelayedBrain, EchoBrain, FailingBrain, ScriptedBrain};
use orchestrator::{
    Brain, BrainError, Domain, OrchestrationState, Orchestrator, OrchestratorError, Specialists, StreamEvent,
    Turn, EXEC_WALLET_REQUIRED_MESSAGE,
};

const WALLET_A: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
const WALLET_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("orchestrator=debug")
        .with_test_writer()
        .try_init();
}

fn last_values(events: &[StreamEvent]) -> OrchestrationState {
    events
        .iter()
        .rev()
        .find_map(|event| match event {
            StreamEvent::Values(state) => Some(state.clone()),
            _ => None,
        })
        .expect("at least one snapshot")
}

fn last_reply(state: &OrchestrationState) -> String {
    state
        .messages
        .iter()
        .last()
        .map(|turn| turn.content.clone())
        .unwrap_or_default()
}

fn fragment_texts(events: &[StreamEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| event.fragment().map(|f| f.text.clone()))
        .collect()
}

#[tokio::test]
async fn test_client_stream_defaults_to_research_and_hides_label() {
    init_tracing();
    let research = Arc::new(ScriptedBrain::new("Nothing unusual on-chain today."));
    let specialists = Specialists::shared(Arc::new(ScriptedBrain::new("wrong specialist")))
        .with(orchestrator::Specialist::for_domain(Domain::Research, research.clone()));
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(EchoBrain::new()),
        specialists,
    ));

    let state = OrchestrationState::new(vec![Turn::user("hello there")]);
    let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;

    assert_eq!(research.calls(), 1);
    let texts = fragment_texts(&events);
    assert_eq!(texts, vec!["Hey Anon 👋\n\nNothing unusual on-chain today."]);
    assert!(!texts.iter().any(|t| Domain::is_label(t)));
    assert_eq!(
        last_reply(&last_values(&events)),
        "Hey Anon 👋\n\nNothing unusual on-chain today."
    );
}

#[tokio::test]
async fn test_raw_stream_carries_label() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("TA")),
        Specialists::shared(Arc::new(ScriptedBrain::new("RSI is 61."))),
    ));

    let events: Vec<StreamEvent> = orchestrator
        .stream(vec![Turn::user("chart ETH")])
        .map(|item| item.expect("run succeeds"))
        .collect()
        .await;

    assert_eq!(
        fragment_texts(&events),
        vec!["ta".to_string(), "Hey Anon 👋\n\nRSI is 61.".to_string()]
    );
}

#[tokio::test]
async fn test_gated_exec_refuses_without_wallet() {
    let specialist = Arc::new(ScriptedBrain::new("swapped"));
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("exec")),
        Specialists::shared(specialist.clone()),
    ));

    let state = OrchestrationState::new(vec![Turn::user("swap 1 ETH for USDC")]);
    let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;

    assert_eq!(specialist.calls(), 0);
    let reply = last_reply(&last_values(&events));
    assert!(reply.starts_with("Hey Anon 👋\n\n"));
    assert!(reply.contains(EXEC_WALLET_REQUIRED_MESSAGE));
}

#[tokio::test]
async fn test_wallet_in_message_unlocks_portfolio() {
    let specialist = Arc::new(ScriptedBrain::new("You hold 2 ETH."));
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("portfolio")),
        Specialists::shared(specialist.clone()),
    ));

    let state = OrchestrationState::new(vec![Turn::user(format!("balances for {}", WALLET_A))]);
    let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;

    assert_eq!(specialist.calls(), 1);
    let final_state = last_values(&events);
    assert_eq!(final_state.wallet, WALLET_A);
    assert_eq!(last_reply(&final_state), "Hey Anon 👋\n\nYou hold 2 ETH.");
}

#[tokio::test]
async fn test_failing_supervisor_yields_one_recovery_event() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(FailingBrain::new("quota exceeded")),
        Specialists::shared(Arc::new(ScriptedBrain::new("unused"))),
    ));

    let state = OrchestrationState::new(vec![Turn::user("gm")]).with_wallet(WALLET_A);
    let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;

    let recoveries: Vec<&StreamEvent> = events
        .iter()
        .filter(|event| match event {
            StreamEvent::Values(state) => last_reply(state).contains("Sorry, I ran into an issue"),
            _ => false,
        })
        .collect();
    assert_eq!(recoveries.len(), 1);
    assert_eq!(events.last(), Some(recoveries[0]));

    let recovery = last_values(&events);
    assert!(recovery.wallet.is_empty());
    assert_eq!(
        last_reply(&recovery),
        "Hey Anon 👋\n\nSorry, I ran into an issue: model unavailable: quota exceeded\n\nTry again or rephrase your question."
    );
}

#[tokio::test]
async fn test_failing_specialist_surfaces_as_error_item() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("research")),
        Specialists::shared(Arc::new(FailingBrain::new("boom"))),
    ));

    let items: Vec<Result<StreamEvent, OrchestratorError>> =
        orchestrator.stream(vec![Turn::user("gm")]).collect().await;

    let errors: Vec<&OrchestratorError> = items.iter().filter_map(|i| i.as_ref().err()).collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(items.last(), Some(Err(OrchestratorError::Brain(_)))));
}

/// Specialist model that panics mid-call.
struct PanickingBrain;

#[async_trait]
impl Brain for PanickingBrain {
    async fn generate(&self, _turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        panic!("specialist exploded");
    }

    fn name(&self) -> &str {
        "PanickingBrain"
    }
}

#[tokio::test]
async fn test_panicking_specialist_yields_one_recovery_event() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("research")),
        Specialists::shared(Arc::new(PanickingBrain)),
    ));

    let state = OrchestrationState::new(vec![Turn::user("gm")]);
    let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;

    let recoveries: Vec<&StreamEvent> = events
        .iter()
        .filter(|event| match event {
            StreamEvent::Values(state) => last_reply(state).contains("Sorry, I ran into an issue"),
            _ => false,
        })
        .collect();
    assert_eq!(recoveries.len(), 1);
    assert_eq!(events.last(), Some(recoveries[0]));
    assert!(last_reply(&last_values(&events))
        .contains("Sorry, I ran into an issue: internal error: specialist exploded"));
}

#[tokio::test]
async fn test_panicking_specialist_surfaces_as_error_item() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("research")),
        Specialists::shared(Arc::new(PanickingBrain)),
    ));

    let items: Vec<Result<StreamEvent, OrchestratorError>> =
        orchestrator.stream(vec![Turn::user("gm")]).collect().await;

    assert!(matches!(
        items.last(),
        Some(Err(OrchestratorError::Panicked(message))) if message == "specialist exploded"
    ));
}

#[tokio::test]
async fn test_deadline_expiry_recovers() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("research")),
        Specialists::shared(Arc::new(DelayedBrain::with_secs(
            ScriptedBrain::new("too late"),
            5,
        ))),
    ));

    let state = OrchestrationState::new(vec![Turn::user("gm")]);
    let events: Vec<StreamEvent> = orchestrator
        .respond(state, Some(Duration::from_millis(50)))
        .collect()
        .await;

    let reply = last_reply(&last_values(&events));
    assert!(reply.contains("Sorry, I ran into an issue: request timed out after 50ms"));
}

#[tokio::test]
async fn test_dropping_stream_cancels_run() {
    let specialist = Arc::new(ScriptedBrain::new("never sent"));
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("research")),
        Specialists::shared(Arc::new(DelayedBrain::with_millis(specialist.clone(), 200))),
    ));

    let mut stream = orchestrator.stream(vec![Turn::user("gm")]);
    // Initial snapshot arrives before any model call.
    let first = stream.next().await.expect("first event").expect("not an error");
    assert_eq!(first.kind(), "values");
    drop(stream);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(specialist.calls(), 0);
}

#[tokio::test]
async fn test_concurrent_runs_keep_their_own_wallet() {
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("portfolio")),
        Specialists::shared(Arc::new(DelayedBrain::with_millis(
            EchoBrain::with_prefix("checked: "),
            20,
        )) as Arc<dyn Brain>),
    ));

    let runs = (0..8).map(|i| {
        let orchestrator = orchestrator.clone();
        let wallet = if i % 2 == 0 { WALLET_A } else { WALLET_B };
        tokio::spawn(async move {
            let state =
                OrchestrationState::new(vec![Turn::user(format!("balances for {}", wallet))]);
            let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;
            (wallet, last_values(&events))
        })
    });

    for run in futures::future::join_all(runs).await {
        let (wallet, state) = run.expect("run task");
        assert_eq!(state.wallet, wallet);
        assert!(last_reply(&state).contains(wallet));
    }
}

#[tokio::test]
async fn test_prior_wallet_survives_turn_without_address() {
    let specialist = Arc::new(ScriptedBrain::new("Yield looks fine."));
    let orchestrator = Arc::new(Orchestrator::with_brains(
        Arc::new(ScriptedBrain::new("portfolio")),
        Specialists::shared(specialist.clone()),
    ));

    let state = OrchestrationState::new(vec![Turn::user("and my yield?")]).with_wallet(WALLET_B);
    let events: Vec<StreamEvent> = orchestrator.respond(state, None).collect().await;

    assert_eq!(specialist.calls(), 1);
    assert_eq!(last_values(&events).wallet, WALLET_B);
}
