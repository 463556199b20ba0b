//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use saga_core::GameSession;

use super::{RepositoryError, Result, SnapshotRepository};

/// On-disk encoding of a snapshot file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SaveFormat {
    /// Human-readable, `{key}.json`.
    #[default]
    Json,
    /// Compact, `{key}.bin`.
    Bincode,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Bincode => "bin",
        }
    }

    fn encode(self, session: &GameSession) -> Result<Vec<u8>> {
        match self {
            SaveFormat::Json => serde_json::to_vec_pretty(session)
                .map_err(|e| RepositoryError::Json(e.to_string())),
            SaveFormat::Bincode => bincode::serialize(session)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<GameSession> {
        match self {
            SaveFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
            SaveFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
        }
    }
}

/// File-based implementation of SnapshotRepository.
///
/// Each slot is one file named `{key}.{ext}` under `base_dir`. Writes go to
/// a temp file first and are renamed into place, so a crash never leaves a
/// half-written slot.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
    format: SaveFormat,
}

impl FileSnapshotRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>, format: SaveFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir, format })
    }

    /// Platform data directory for save slots, e.g.
    /// `~/.local/share/battle-farm-saga/saves` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "battle-farm-saga").map(|dirs| dirs.data_dir().join("saves"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn format(&self) -> SaveFormat {
        self.format
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidKey(key.to_string()));
        }
        Ok(self
            .base_dir
            .join(format!("{key}.{}", self.format.extension())))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn get(&self, key: &str) -> Result<Option<GameSession>> {
        let path = self.slot_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let session = self.format.decode(&bytes)?;

        tracing::debug!("Loaded slot[{}] from {}", key, path.display());

        Ok(Some(session))
    }

    fn set(&self, key: &str, session: &GameSession) -> Result<()> {
        let path = self.slot_path(key)?;
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.format.encode(session)?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot[{}] to {}", key, path.display());

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot[{}]", key);
        }

        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let suffix = format!(".{}", self.format.extension());
        let mut keys = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(key) = filename.strip_suffix(suffix.as_str())
                && !key.is_empty()
            {
                keys.push(key.to_string());
            }
        }

        keys.sort_unstable();
        Ok(keys)
    }
}
