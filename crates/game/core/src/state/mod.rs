//! Authoritative session snapshot.
//!
//! This module owns the data structures that describe a combat session: the
//! player, the current enemy, buffs, pending decisions and the narrative log.
//! Runtime layers clone or persist snapshots but only ever obtain a new one
//! from the engine. Every type here is plain data (no closures, no shared
//! ownership), so `Clone` is a full structural copy.
mod buff;
mod decision;
mod enemy;
mod player;

pub use buff::{BuffId, BuffInstance, BuffTemplate};
pub use decision::{
    DecisionEffect, DecisionId, DecisionKind, DecisionOption, PendingDecision, StatKind,
};
pub use enemy::{Archetype, EnemyId, EnemyState};
pub use player::{PlayerState, SkillInstance};

use crate::content::create_base_player;

/// Lifecycle of a session. `Victory` and `Defeat` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    /// Never reached by the core loop: waves are unbounded.
    Victory,
    Defeat,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Victory | SessionStatus::Defeat)
    }
}

/// Presentation hint for a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    System,
    Player,
    Enemy,
    Reward,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub id: u64,
    pub text: String,
    pub tone: Tone,
    /// Milliseconds since the Unix epoch, from the injected clock.
    pub timestamp: u64,
}

/// Monotonic id allocators. Living in the snapshot keeps ids unique for the
/// whole session lifetime, across save/load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SessionCounters {
    pub next_enemy: u64,
    pub next_buff: u64,
    pub next_decision: u64,
    pub next_log: u64,
}

impl SessionCounters {
    pub fn enemy_id(&mut self) -> EnemyId {
        EnemyId(bump(&mut self.next_enemy))
    }

    pub fn buff_id(&mut self) -> BuffId {
        BuffId(bump(&mut self.next_buff))
    }

    pub fn decision_id(&mut self) -> DecisionId {
        DecisionId(bump(&mut self.next_decision))
    }

    pub fn log_id(&mut self) -> u64 {
        bump(&mut self.next_log)
    }
}

fn bump(counter: &mut u64) -> u64 {
    let id = *counter;
    *counter = counter.wrapping_add(1);
    id
}

/// The persisted/serializable unit handed to presentation and storage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameSession {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    pub status: SessionStatus,
    /// Current wave (>= 1, never decreases).
    pub wave: u32,
    /// Resolved turns + 1 (>= 1, never decreases).
    pub turn: u32,
    /// Accepted-action counter; feeds the roll seeds.
    pub nonce: u64,
    /// Base seed for every random roll in this session.
    pub seed: u64,
    pub player: PlayerState,
    /// `None` only before start or transiently inside a reduction.
    pub enemy: Option<EnemyState>,
    pub log: Vec<LogEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending_decision: Option<PendingDecision>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub counters: SessionCounters,
}

impl GameSession {
    /// Creates an idle session with an unnamed baseline player and no enemy.
    ///
    /// The opening log line is added by [`crate::GameEngine::blank_session`],
    /// which has access to the clock.
    pub fn blank(id: impl Into<String>, created_at: u64, seed: u64) -> Self {
        Self {
            id: id.into(),
            created_at,
            status: SessionStatus::Idle,
            wave: 1,
            turn: 1,
            nonce: 0,
            seed,
            player: create_base_player(""),
            enemy: None,
            log: Vec::new(),
            pending_decision: None,
            counters: SessionCounters::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn has_pending_decision(&self) -> bool {
        self.pending_decision.is_some()
    }

    /// Log entries appended since `previous` was taken, i.e. the output of a
    /// single transition. Robust to log-capacity trimming.
    pub fn log_since(&self, previous: &GameSession) -> &[LogEntry] {
        let watermark = previous.counters.next_log;
        let start = self.log.partition_point(|entry| entry.id < watermark);
        &self.log[start..]
    }
}
