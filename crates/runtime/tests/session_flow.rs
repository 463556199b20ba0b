use std::sync::Arc;

use saga_core::{
    ActionRejection, FixedClock, GameConfig, GameEngine, GameEnv, PcgRng, PlayerAction,
    SessionStatus,
};
use saga_runtime::{
    Event, InMemorySnapshotRepo, OracleManager, Runtime, RuntimeConfig, RuntimeError,
    ScriptedActionProvider, SessionEvent, SnapshotRepository, Topic,
};

const NOW: u64 = 1_700_000_000_000;

fn oracles() -> OracleManager {
    OracleManager::default().with_clock(Arc::new(FixedClock(NOW)))
}

fn config(seed: u64) -> RuntimeConfig {
    RuntimeConfig {
        seed: Some(seed),
        ..RuntimeConfig::default()
    }
}

async fn runtime(seed: u64) -> Runtime {
    Runtime::builder()
        .config(config(seed))
        .oracles(oracles())
        .build()
        .await
        .expect("runtime should build")
}

#[tokio::test]
async fn fresh_runtime_holds_an_idle_session() {
    let runtime = runtime(7).await;
    let session = runtime.handle().query_session().await.unwrap();

    assert_eq!(session.status, SessionStatus::Idle);
    assert_eq!(session.seed, 7);
    assert_eq!(session.id.len(), 16);
    assert!(session.enemy.is_none());
    assert_eq!(session.log.len(), 1);
    assert_eq!(session.log[0].timestamp, NOW);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn start_publishes_log_and_session_events() {
    let runtime = runtime(11).await;
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);
    let mut log_rx = handle.subscribe(Topic::Log);

    let transition = handle.start("Ada").await.unwrap();
    assert!(transition.is_accepted());
    assert_eq!(transition.session.status, SessionStatus::Running);
    assert_eq!(transition.session.player.name, "Ada");

    match log_rx.recv().await.unwrap() {
        Event::Log(log) => {
            assert_eq!(log.session_id, transition.session.id);
            assert_eq!(log.entries.len(), 2);
            assert!(log.entries[0].text.ends_with("emerges from the mist."));
            assert_eq!(log.entries[1].text, "Season begins. Defend Ada's land!");
        }
        other => panic!("unexpected event {other:?}"),
    }
    match session_rx.recv().await.unwrap() {
        Event::Session(SessionEvent::Started { session }) => {
            assert_eq!(*session, transition.session);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let again = handle.start("Bob").await.unwrap();
    assert_eq!(again.rejection, Some(ActionRejection::AlreadyStarted));
    assert_eq!(again.session, transition.session);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn dispatch_before_start_is_rejected_silently() {
    let runtime = runtime(3).await;
    let handle = runtime.handle();
    let before = handle.query_session().await.unwrap();

    let transition = handle.dispatch(PlayerAction::Attack).await.unwrap();
    assert_eq!(transition.rejection, Some(ActionRejection::SessionNotRunning));
    assert_eq!(transition.session, before);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn applied_action_event_carries_both_snapshots() {
    let runtime = runtime(21).await;
    let handle = runtime.handle();
    let started = handle.start("Ada").await.unwrap().session;
    let mut session_rx = handle.subscribe(Topic::Session);

    let transition = handle.dispatch(PlayerAction::Attack).await.unwrap();
    assert!(transition.is_accepted());
    assert_eq!(transition.session.nonce, started.nonce + 1);
    assert_eq!(transition.session.turn, started.turn + 1);

    match session_rx.recv().await.unwrap() {
        Event::Session(SessionEvent::ActionApplied {
            nonce,
            action,
            before,
            after,
        }) => {
            assert_eq!(nonce, started.nonce);
            assert_eq!(action, PlayerAction::Attack);
            assert_eq!(*before, started);
            assert_eq!(*after, transition.session);
        }
        other => panic!("unexpected event {other:?}"),
    }

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_action_keeps_state_and_history() {
    let runtime = runtime(5).await;
    let handle = runtime.handle();
    let started = handle.start("Ada").await.unwrap().session;
    let mut session_rx = handle.subscribe(Topic::Session);

    let transition = handle
        .dispatch(PlayerAction::decision("missing"))
        .await
        .unwrap();
    assert_eq!(transition.rejection, Some(ActionRejection::NoPendingDecision));
    assert_eq!(transition.session.nonce, started.nonce);
    assert_eq!(transition.session.turn, started.turn);
    assert_eq!(transition.session.log.len(), started.log.len() + 1);

    match session_rx.recv().await.unwrap() {
        Event::Session(SessionEvent::ActionRejected {
            nonce, rejection, ..
        }) => {
            assert_eq!(nonce, started.nonce);
            assert_eq!(rejection, ActionRejection::NoPendingDecision);
        }
        other => panic!("unexpected event {other:?}"),
    }

    // Only the start is in history, so one undo returns to idle.
    let undone = handle.undo().await.unwrap();
    assert_eq!(undone.status, SessionStatus::Idle);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn undo_walks_back_through_history() {
    let runtime = runtime(9).await;
    let handle = runtime.handle();
    let idle = handle.query_session().await.unwrap();
    let started = handle.start("Ada").await.unwrap().session;
    handle.dispatch(PlayerAction::Skip).await.unwrap();

    assert_eq!(handle.undo().await.unwrap(), started);
    assert_eq!(handle.undo().await.unwrap(), idle);
    assert!(matches!(
        handle.undo().await,
        Err(RuntimeError::NothingToUndo)
    ));
    assert_eq!(handle.query_session().await.unwrap(), idle);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn history_limit_zero_disables_undo() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            history_limit: 0,
            ..config(1)
        })
        .oracles(oracles())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle.start("Ada").await.unwrap();

    assert!(matches!(
        handle.undo().await,
        Err(RuntimeError::NothingToUndo)
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn reset_replaces_session_and_clears_history() {
    let runtime = runtime(2).await;
    let handle = runtime.handle();
    let first = handle.start("Ada").await.unwrap().session;

    let fresh = handle.reset(Some(99)).await.unwrap();
    assert_eq!(fresh.status, SessionStatus::Idle);
    assert_eq!(fresh.seed, 99);
    assert_ne!(fresh.id, first.id);
    assert!(matches!(
        handle.undo().await,
        Err(RuntimeError::NothingToUndo)
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn fatal_blow_publishes_ended() {
    let config = GameConfig::default();
    let clock = FixedClock(NOW);
    let engine = GameEngine::new(GameEnv::new(&PcgRng, &clock), &config);
    let mut session = engine.new_session("doomed", 4, "Ada");
    session.player.health = 1;

    let runtime = Runtime::builder()
        .oracles(oracles())
        .initial_session(session)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);

    let transition = handle.dispatch(PlayerAction::Skip).await.unwrap();
    assert_eq!(transition.session.status, SessionStatus::Defeat);
    assert_eq!(
        transition.session.log.last().map(|entry| entry.text.as_str()),
        Some("You fall defending the fields...")
    );

    assert!(matches!(
        session_rx.recv().await.unwrap(),
        Event::Session(SessionEvent::ActionApplied { .. })
    ));
    match session_rx.recv().await.unwrap() {
        Event::Session(SessionEvent::Ended { status, wave, .. }) => {
            assert_eq!(status, SessionStatus::Defeat);
            assert_eq!(wave, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let after = handle.dispatch(PlayerAction::Attack).await.unwrap();
    assert_eq!(after.rejection, Some(ActionRejection::SessionNotRunning));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn autosave_writes_every_accepted_action() {
    let repo = Arc::new(InMemorySnapshotRepo::new());
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            autosave: true,
            session_key: "farm".to_string(),
            ..config(13)
        })
        .oracles(oracles())
        .repository(repo.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert!(!repo.exists("farm").unwrap());
    let started = handle.start("Ada").await.unwrap().session;
    assert_eq!(repo.get("farm").unwrap(), Some(started));

    let attacked = handle.dispatch(PlayerAction::Attack).await.unwrap().session;
    assert_eq!(repo.get("farm").unwrap(), Some(attacked.clone()));

    // Rejections do not touch the slot.
    handle.dispatch(PlayerAction::decision("nope")).await.unwrap();
    assert_eq!(repo.get("farm").unwrap(), Some(attacked));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn step_requires_a_provider() {
    let mut runtime = runtime(1).await;
    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::ProviderNotSet)
    ));
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn run_until_stops_at_turn_cap() {
    let mut runtime = Runtime::builder()
        .config(config(17))
        .oracles(oracles())
        .provider(ScriptedActionProvider::new([
            PlayerAction::Attack,
            PlayerAction::Heal,
            PlayerAction::Attack,
        ]))
        .build()
        .await
        .unwrap();
    runtime.handle().start("Ada").await.unwrap();

    let session = runtime.run_until(4).await.unwrap();
    assert!(session.turn <= 4);
    assert!(session.nonce >= 2);

    runtime.shutdown().await.unwrap();
}
