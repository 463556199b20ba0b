//! Repository contract for persisting session snapshots.

use saga_core::GameSession;

use super::Result;

/// Key-value store of session snapshots ("save slots").
///
/// The engine does not know the storage medium; implementations may keep
/// snapshots in memory, on disk or remotely.
pub trait SnapshotRepository: Send + Sync {
    /// Load the snapshot stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<GameSession>>;

    /// Store `session` under `key`, replacing any previous snapshot.
    fn set(&self, key: &str, session: &GameSession) -> Result<()>;

    /// Remove the snapshot under `key`. Missing keys are not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// All occupied slot keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
