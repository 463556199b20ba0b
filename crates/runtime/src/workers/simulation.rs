//! Simulation worker that owns the authoritative [`saga_core::GameSession`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), reduces
//! actions through [`saga_core::GameEngine`], keeps a bounded undo history,
//! persists snapshots, and publishes events to the EventBus.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use saga_core::{GameEngine, GameSession, PlayerAction, Transition};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, LogEvent, RestoreSource, SessionEvent};
use crate::oracle::OracleManager;
use crate::repository::SnapshotRepository;
use crate::runtime::{RuntimeConfig, new_session_id};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Start the idle session with a player name.
    Start {
        name: String,
        reply: oneshot::Sender<Transition>,
    },
    /// Reduce one player action.
    Dispatch {
        action: PlayerAction,
        reply: oneshot::Sender<Transition>,
    },
    /// Query the current session (read-only).
    Query { reply: oneshot::Sender<GameSession> },
    /// Persist the live session; `None` uses the configured session key.
    Save {
        key: Option<String>,
        reply: oneshot::Sender<Result<String>>,
    },
    /// Replace the live session with a stored slot.
    Load {
        key: String,
        reply: oneshot::Sender<Result<GameSession>>,
    },
    /// Pop the undo history.
    Undo {
        reply: oneshot::Sender<Result<GameSession>>,
    },
    /// Replace the live session with a fresh idle one.
    Reset {
        seed: Option<u64>,
        reply: oneshot::Sender<GameSession>,
    },
    Slots {
        reply: oneshot::Sender<Result<Vec<String>>>,
    },
    Delete {
        key: String,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Background task that processes session commands.
///
/// The worker is the only writer of the live session. Reductions are pure, so
/// the snapshot before each accepted action is kept verbatim for undo.
pub struct SimulationWorker {
    session: GameSession,
    history: VecDeque<GameSession>,
    config: RuntimeConfig,
    oracles: OracleManager,
    repository: Arc<dyn SnapshotRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        session: GameSession,
        config: RuntimeConfig,
        oracles: OracleManager,
        repository: Arc<dyn SnapshotRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            "SimulationWorker initialized with session {} ({}, wave {}, turn {})",
            session.id, session.status, session.wave, session.turn
        );

        Self {
            session,
            history: VecDeque::new(),
            config,
            oracles,
            repository,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!("SimulationWorker stopped at nonce {}", self.session.nonce);
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { name, reply } => {
                let transition = self.handle_start(&name);
                if reply.send(transition).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Dispatch { action, reply } => {
                let transition = self.handle_action(action);
                if reply.send(transition).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                if reply.send(self.session.clone()).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
            Command::Save { key, reply } => {
                let result = self.handle_save(key);
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Load { key, reply } => {
                let result = self.handle_load(key);
                if reply.send(result).is_err() {
                    debug!("Load reply channel closed (caller dropped)");
                }
            }
            Command::Undo { reply } => {
                let result = self.handle_undo();
                if reply.send(result).is_err() {
                    debug!("Undo reply channel closed (caller dropped)");
                }
            }
            Command::Reset { seed, reply } => {
                let session = self.handle_reset(seed);
                if reply.send(session).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::Slots { reply } => {
                let result = self.repository.keys().map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("Slots reply channel closed (caller dropped)");
                }
            }
            Command::Delete { key, reply } => {
                let result = self.repository.delete(&key).map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("Delete reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn engine(&self) -> GameEngine<'_> {
        GameEngine::new(self.oracles.as_game_env(), &self.config.game_config)
    }

    fn handle_start(&mut self, name: &str) -> Transition {
        let transition = self.engine().start(&self.session, name);
        let before = std::mem::replace(&mut self.session, transition.session.clone());
        self.publish_log(&before);

        match &transition.rejection {
            None => {
                info!(
                    target: "runtime::worker",
                    session = %self.session.id,
                    player = %self.session.player.name,
                    "Session started"
                );
                self.remember(before);
                self.event_bus.publish(Event::Session(SessionEvent::Started {
                    session: Box::new(self.session.clone()),
                }));
                self.autosave();
            }
            Some(rejection) => {
                debug!(target: "runtime::worker", %rejection, "Start rejected");
            }
        }
        transition
    }

    fn handle_action(&mut self, action: PlayerAction) -> Transition {
        let transition = self.engine().dispatch(&self.session, &action);
        let before = std::mem::replace(&mut self.session, transition.session.clone());
        self.publish_log(&before);

        match &transition.rejection {
            None => {
                debug!(
                    target: "runtime::worker",
                    action = action.as_ref(),
                    nonce = before.nonce,
                    turn = self.session.turn,
                    "Action applied"
                );
                let ended = !before.status.is_terminal() && self.session.status.is_terminal();
                self.event_bus
                    .publish(Event::Session(SessionEvent::ActionApplied {
                        nonce: before.nonce,
                        action,
                        before: Box::new(before.clone()),
                        after: Box::new(self.session.clone()),
                    }));
                self.remember(before);
                if ended {
                    info!(
                        target: "runtime::worker",
                        status = %self.session.status,
                        wave = self.session.wave,
                        turn = self.session.turn,
                        "Session ended"
                    );
                    self.event_bus.publish(Event::Session(SessionEvent::Ended {
                        status: self.session.status,
                        wave: self.session.wave,
                        turn: self.session.turn,
                    }));
                }
                self.autosave();
            }
            Some(rejection) => {
                debug!(
                    target: "runtime::worker",
                    action = action.as_ref(),
                    %rejection,
                    "Action rejected"
                );
                self.event_bus
                    .publish(Event::Session(SessionEvent::ActionRejected {
                        nonce: self.session.nonce,
                        action,
                        rejection: rejection.clone(),
                    }));
            }
        }
        transition
    }

    fn handle_save(&mut self, key: Option<String>) -> Result<String> {
        let key = key.unwrap_or_else(|| self.config.session_key.clone());
        self.repository.set(&key, &self.session)?;
        info!(target: "runtime::worker", slot = %key, nonce = self.session.nonce, "Session saved");
        self.event_bus.publish(Event::Session(SessionEvent::Saved {
            key: key.clone(),
            nonce: self.session.nonce,
        }));
        Ok(key)
    }

    fn handle_load(&mut self, key: String) -> Result<GameSession> {
        let session = self
            .repository
            .get(&key)?
            .ok_or_else(|| RuntimeError::SlotNotFound { key: key.clone() })?;
        info!(target: "runtime::worker", slot = %key, session = %session.id, "Session loaded");
        self.restore(session, RestoreSource::Slot { key });
        Ok(self.session.clone())
    }

    fn handle_undo(&mut self) -> Result<GameSession> {
        let previous = self.history.pop_back().ok_or(RuntimeError::NothingToUndo)?;
        debug!(target: "runtime::worker", nonce = previous.nonce, "Undo");
        self.session = previous;
        self.event_bus.publish(Event::Session(SessionEvent::Restored {
            source: RestoreSource::Undo,
            session: Box::new(self.session.clone()),
        }));
        Ok(self.session.clone())
    }

    fn handle_reset(&mut self, seed: Option<u64>) -> GameSession {
        let seed = seed.unwrap_or_else(rand::random);
        let session = self.engine().blank_session(new_session_id(), seed);
        info!(target: "runtime::worker", session = %session.id, seed, "Session reset");
        self.restore(session, RestoreSource::Reset);
        self.session.clone()
    }

    /// Swaps in a session from outside the reducer; history no longer applies.
    fn restore(&mut self, session: GameSession, source: RestoreSource) {
        self.history.clear();
        self.session = session;
        self.event_bus.publish(Event::Session(SessionEvent::Restored {
            source,
            session: Box::new(self.session.clone()),
        }));
    }

    fn remember(&mut self, before: GameSession) {
        if self.config.history_limit == 0 {
            return;
        }
        if self.history.len() == self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(before);
    }

    fn publish_log(&self, before: &GameSession) {
        let entries = self.session.log_since(before);
        if entries.is_empty() {
            return;
        }
        self.event_bus.publish(Event::Log(LogEvent {
            session_id: self.session.id.clone(),
            entries: entries.to_vec(),
        }));
    }

    /// Best-effort write to the session key; failures never reject the action.
    fn autosave(&self) {
        if !self.config.autosave {
            return;
        }
        if let Err(error) = self.repository.set(&self.config.session_key, &self.session) {
            warn!(
                target: "runtime::worker",
                slot = %self.config.session_key,
                error = %error,
                "Autosave failed"
            );
        }
    }
}
