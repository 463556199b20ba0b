//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use saga_core::GameConfig;
use saga_runtime::{RuntimeConfig, SaveFormat};

/// Everything the `saga` binary needs to assemble and drive a runtime.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub player_name: String,
    pub session_key: String,
    pub seed: Option<u64>,
    pub max_turns: u32,
    pub autosave: bool,
    pub resume: bool,
    pub save_data_dir: Option<PathBuf>,
    pub save_format: SaveFormat,
    pub log_capacity: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            session_key: "autosave".to_string(),
            seed: None,
            max_turns: 200,
            autosave: true,
            resume: false,
            save_data_dir: None,
            save_format: SaveFormat::Json,
            log_capacity: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SAGA_PLAYER_NAME` - Farm name; blank uses the game default
    /// - `SAGA_SESSION_KEY` - Save slot for autosave (default: autosave)
    /// - `SAGA_SEED` - Fixed seed for a new session (default: random)
    /// - `SAGA_MAX_TURNS` - Stop the autopilot after this turn (default: 200)
    /// - `SAGA_AUTOSAVE` - Save after every accepted action (default: true)
    /// - `SAGA_RESUME` - Continue the session in the slot if present (default: false)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform-specific)
    /// - `SAGA_SAVE_FORMAT` - `json` or `bincode` (default: json)
    /// - `SAGA_LOG_CAPACITY` - Keep only the newest N log lines (default: unbounded)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = env::var("SAGA_PLAYER_NAME") {
            config.player_name = name;
        }
        if let Ok(key) = env::var("SAGA_SESSION_KEY")
            && !key.trim().is_empty()
        {
            config.session_key = key.trim().to_string();
        }

        config.seed = read_env::<u64>("SAGA_SEED");

        if let Some(turns) = read_env::<u32>("SAGA_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        if let Some(enable) = read_env::<bool>("SAGA_AUTOSAVE") {
            config.autosave = enable;
        }
        if let Some(enable) = read_env::<bool>("SAGA_RESUME") {
            config.resume = enable;
        } else if env::var("SAGA_RESUME").is_ok() {
            // Accept a bare `SAGA_RESUME=` as "true"
            config.resume = true;
        }

        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);

        if let Some(format) = read_env::<SaveFormat>("SAGA_SAVE_FORMAT") {
            config.save_format = format;
        }

        config.log_capacity = read_env::<usize>("SAGA_LOG_CAPACITY").filter(|&n| n > 0);

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let mut game_config = GameConfig::new();
        if let Some(capacity) = self.log_capacity {
            game_config = game_config.with_log_capacity(capacity);
        }

        RuntimeConfig {
            game_config,
            autosave: self.autosave,
            session_key: self.session_key.clone(),
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_carries_client_choices() {
        let config = ClientConfig {
            seed: Some(5),
            autosave: false,
            session_key: "farm".to_string(),
            log_capacity: Some(50),
            ..ClientConfig::default()
        };

        let runtime = config.runtime_config();
        assert_eq!(runtime.seed, Some(5));
        assert!(!runtime.autosave);
        assert_eq!(runtime.session_key, "farm");
        assert_eq!(runtime.game_config.log_capacity, Some(50));
    }
}
