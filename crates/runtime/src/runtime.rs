//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use saga_core::{GameConfig, GameEngine, GameSession, Transition};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{InMemorySnapshotRepo, SnapshotRepository};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Snapshots kept for undo; 0 disables undo.
    pub history_limit: usize,
    /// Write the session to `session_key` after every accepted action.
    pub autosave: bool,
    /// Slot used by autosave and by saves without an explicit key.
    pub session_key: String,
    /// Seed for a freshly created session; random when `None`.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            history_limit: 32,
            autosave: false,
            session_key: "autosave".to_string(),
            seed: None,
        }
    }
}

/// Random 16-hex-digit session identifier.
pub(crate) fn new_session_id() -> String {
    hex::encode(rand::random::<[u8; 8]>())
}

/// Main runtime that drives one game session
///
/// Design: Runtime owns the worker and the action provider.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Ask the provider for one action and apply it.
    pub async fn step(&mut self) -> Result<Transition> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let session = self.handle.query_session().await?;
        let action = provider.provide_action(&session).await?;

        self.handle.dispatch(action).await
    }

    /// Step until the session leaves `running` or `max_turns` is reached.
    ///
    /// Returns the final snapshot. Rejected actions count as steps so a
    /// misbehaving provider cannot spin forever.
    pub async fn run_until(&mut self, max_turns: u32) -> Result<GameSession> {
        let mut steps = 0u32;
        loop {
            let session = self.handle.query_session().await?;
            if !session.is_running() || session.turn >= max_turns || steps >= max_turns {
                return Ok(session);
            }
            self.step().await?;
            steps += 1;
        }
    }

    /// Set the action provider
    pub fn set_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Other clones of the handle keep the worker alive until dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session: Option<GameSession>,
    resume_key: Option<String>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn SnapshotRepository>>,
    provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            resume_key: None,
            oracles: None,
            repository: None,
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the initial session instead of a fresh idle one
    pub fn initial_session(mut self, session: GameSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Load the initial session from a repository slot at build time.
    ///
    /// Takes precedence over [`Self::initial_session`]; a missing slot fails
    /// the build with [`RuntimeError::SlotNotFound`].
    pub fn resume_from(mut self, key: impl Into<String>) -> Self {
        self.resume_key = Some(key.into());
        self
    }

    /// Override the oracles (defaults to PCG and the system clock)
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the snapshot repository (defaults to in-memory)
    pub fn repository(mut self, repository: Arc<dyn SnapshotRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the action provider used by [`Runtime::step`] (optional)
    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.unwrap_or_default();
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemorySnapshotRepo::new()));

        let session = match (self.resume_key, self.session) {
            (Some(key), _) => repository
                .get(&key)?
                .ok_or(RuntimeError::SlotNotFound { key })?,
            (None, Some(session)) => session,
            (None, None) => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                GameEngine::new(oracles.as_game_env(), &self.config.game_config)
                    .blank_session(new_session_id(), seed)
            }
        };
        info!(
            "Runtime built for session {} (seed {}, nonce {})",
            session.id, session.seed, session.nonce
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SimulationWorker::new(
            session,
            self.config,
            oracles,
            repository,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            provider: self.provider,
            worker_handle,
        })
    }
}
