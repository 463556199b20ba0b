use std::sync::Arc;

use saga_core::{FixedClock, PlayerAction, SessionStatus};
use saga_runtime::{
    Event, FileSnapshotRepository, OracleManager, RestoreSource, Runtime, RuntimeConfig,
    RuntimeError, SaveFormat, SessionEvent, SnapshotRepository, Topic,
};
use tempfile::TempDir;

fn oracles() -> OracleManager {
    OracleManager::default().with_clock(Arc::new(FixedClock(1_700_000_000_000)))
}

async fn runtime_with(repo: Arc<dyn SnapshotRepository>, seed: u64) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            seed: Some(seed),
            ..RuntimeConfig::default()
        })
        .oracles(oracles())
        .repository(repo)
        .build()
        .await
        .expect("runtime should build")
}

async fn save_and_resume(format: SaveFormat) {
    let dir = TempDir::new().unwrap();
    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path(), format).unwrap());

    let runtime = runtime_with(repo.clone(), 42).await;
    let handle = runtime.handle();
    handle.start("Ada").await.unwrap();
    for action in [PlayerAction::Attack, PlayerAction::Heal, PlayerAction::Attack] {
        handle.dispatch(action).await.unwrap();
    }
    let saved = handle.query_session().await.unwrap();
    assert_eq!(handle.save(Some("slot-1".into())).await.unwrap(), "slot-1");
    drop(handle);
    runtime.shutdown().await.unwrap();

    let expected = dir.path().join(format!("slot-1.{}", format.extension()));
    assert!(expected.exists());

    let resumed = Runtime::builder()
        .oracles(oracles())
        .repository(repo)
        .resume_from("slot-1")
        .build()
        .await
        .unwrap();
    let handle = resumed.handle();
    assert_eq!(handle.query_session().await.unwrap(), saved);

    // The resumed session keeps reducing from where it left off.
    let next = handle.dispatch(PlayerAction::Skip).await.unwrap();
    assert!(next.is_accepted());
    assert_eq!(next.session.nonce, saved.nonce + 1);

    drop(handle);
    resumed.shutdown().await.unwrap();
}

#[tokio::test]
async fn json_slot_survives_restart() {
    save_and_resume(SaveFormat::Json).await;
}

#[tokio::test]
async fn bincode_slot_survives_restart() {
    save_and_resume(SaveFormat::Bincode).await;
}

#[tokio::test]
async fn resuming_a_missing_slot_fails_the_build() {
    let dir = TempDir::new().unwrap();
    let repo = Arc::new(FileSnapshotRepository::new(dir.path(), SaveFormat::Json).unwrap());

    let result = Runtime::builder()
        .oracles(oracles())
        .repository(repo)
        .resume_from("nowhere")
        .build()
        .await;
    assert!(matches!(
        result,
        Err(RuntimeError::SlotNotFound { key }) if key == "nowhere"
    ));
}

#[tokio::test]
async fn load_replaces_live_session_and_clears_history() {
    let dir = TempDir::new().unwrap();
    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path(), SaveFormat::Json).unwrap());
    let runtime = runtime_with(repo, 8).await;
    let handle = runtime.handle();

    handle.start("Ada").await.unwrap();
    let checkpoint = handle.query_session().await.unwrap();
    handle.save(Some("checkpoint".into())).await.unwrap();
    handle.dispatch(PlayerAction::Attack).await.unwrap();
    handle.dispatch(PlayerAction::Attack).await.unwrap();

    let mut session_rx = handle.subscribe(Topic::Session);
    let loaded = handle.load("checkpoint").await.unwrap();
    assert_eq!(loaded, checkpoint);
    assert_eq!(loaded.status, SessionStatus::Running);

    match session_rx.recv().await.unwrap() {
        Event::Session(SessionEvent::Restored { source, session }) => {
            assert_eq!(
                source,
                RestoreSource::Slot {
                    key: "checkpoint".into()
                }
            );
            assert_eq!(*session, checkpoint);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        handle.undo().await,
        Err(RuntimeError::NothingToUndo)
    ));
    assert!(matches!(
        handle.load("absent").await,
        Err(RuntimeError::SlotNotFound { .. })
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn slots_can_be_listed_and_deleted() {
    let dir = TempDir::new().unwrap();
    let repo: Arc<dyn SnapshotRepository> =
        Arc::new(FileSnapshotRepository::new(dir.path(), SaveFormat::Bincode).unwrap());
    let runtime = runtime_with(repo, 1).await;
    let handle = runtime.handle();

    assert!(handle.slots().await.unwrap().is_empty());
    handle.save(Some("b".into())).await.unwrap();
    handle.save(Some("a".into())).await.unwrap();
    assert_eq!(handle.save(None).await.unwrap(), "autosave");
    assert_eq!(handle.slots().await.unwrap(), vec!["a", "autosave", "b"]);

    handle.delete_slot("b").await.unwrap();
    handle.delete_slot("never-existed").await.unwrap();
    assert_eq!(handle.slots().await.unwrap(), vec!["a", "autosave"]);

    assert!(matches!(
        handle.save(Some("../escape".into())).await,
        Err(RuntimeError::Repository(_))
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}
