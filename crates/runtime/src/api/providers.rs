//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the session
//! can be driven by human input, scripted fixtures, or an autopilot policy.
use std::collections::VecDeque;

use async_trait::async_trait;
use saga_core::{GameSession, PlayerAction};
use tokio::sync::Mutex;

use super::errors::Result;

/// Trait for choosing the next action from a session snapshot.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the next action for the given read-only snapshot.
    async fn provide_action(&self, session: &GameSession) -> Result<PlayerAction>;
}

/// Replays a fixed list of actions, then falls back to `Skip`.
///
/// Useful for tests and for re-running a recorded session.
pub struct ScriptedActionProvider {
    actions: Mutex<VecDeque<PlayerAction>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    /// Number of scripted actions not yet handed out.
    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&self, _session: &GameSession) -> Result<PlayerAction> {
        Ok(self
            .actions
            .lock()
            .await
            .pop_front()
            .unwrap_or(PlayerAction::Skip))
    }
}
