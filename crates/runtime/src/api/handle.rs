//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session, managing save slots, or streaming events.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use saga_core::{GameSession, PlayerAction, Transition};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start the idle session with the given player name.
    ///
    /// Returns the transition; a session that already started comes back
    /// unchanged with [`saga_core::ActionRejection::AlreadyStarted`].
    pub async fn start(&self, name: impl Into<String>) -> Result<Transition> {
        let name = name.into();
        self.request(|reply| Command::Start { name, reply }).await
    }

    /// Apply one player action to the live session.
    pub async fn dispatch(&self, action: PlayerAction) -> Result<Transition> {
        self.request(|reply| Command::Dispatch { action, reply })
            .await
    }

    /// Query the current session (read-only snapshot)
    pub async fn query_session(&self) -> Result<GameSession> {
        self.request(|reply| Command::Query { reply }).await
    }

    /// Persist the live session. `None` saves to the configured session key.
    ///
    /// Returns the key that was written.
    pub async fn save(&self, key: Option<String>) -> Result<String> {
        self.request(|reply| Command::Save { key, reply }).await?
    }

    /// Replace the live session with the snapshot stored under `key`.
    pub async fn load(&self, key: impl Into<String>) -> Result<GameSession> {
        let key = key.into();
        self.request(|reply| Command::Load { key, reply }).await?
    }

    /// Roll back to the snapshot before the last accepted action.
    pub async fn undo(&self) -> Result<GameSession> {
        self.request(|reply| Command::Undo { reply }).await?
    }

    /// Discard the live session and history for a fresh idle session.
    pub async fn reset(&self, seed: Option<u64>) -> Result<GameSession> {
        self.request(|reply| Command::Reset { seed, reply }).await
    }

    /// Keys of every stored slot.
    pub async fn slots(&self) -> Result<Vec<String>> {
        self.request(|reply| Command::Slots { reply }).await?
    }

    pub async fn delete_slot(&self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        self.request(|reply| Command::Delete { key, reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - starts, applied and rejected actions, restores, saves
    /// - `Topic::Log` - log entries appended by each transition
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use saga_runtime::Topic;
    ///
    /// let mut log_rx = handle.subscribe(Topic::Log);
    /// while let Ok(event) = log_rx.recv().await {
    ///     // Render log lines
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
