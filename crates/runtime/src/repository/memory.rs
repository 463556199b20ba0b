//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use saga_core::GameSession;

use super::{RepositoryError, Result, SnapshotRepository};

/// In-memory implementation of SnapshotRepository.
///
/// Stored snapshots are deep copies; later mutation of the caller's value
/// never leaks into the store.
#[derive(Default)]
pub struct InMemorySnapshotRepo {
    slots: RwLock<HashMap<String, GameSession>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single snapshot already stored under `key`.
    pub fn with_snapshot(key: impl Into<String>, session: GameSession) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), session);
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn get(&self, key: &str) -> Result<Option<GameSession>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, session: &GameSession) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(key.to_string(), session.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut keys: Vec<String> = slots.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_snapshot_is_isolated_from_caller() {
        let repo = InMemorySnapshotRepo::new();
        let mut session = GameSession::blank("mem", 0, 1);
        repo.set("slot", &session).unwrap();

        session.wave = 99;
        let stored = repo.get("slot").unwrap().unwrap();
        assert_eq!(stored.wave, 1);
        assert_eq!(repo.keys().unwrap(), vec!["slot".to_string()]);

        repo.delete("slot").unwrap();
        repo.delete("slot").unwrap();
        assert!(repo.get("slot").unwrap().is_none());
    }
}
