//! Event types for different topics.

use saga_core::{ActionRejection, GameSession, LogEntry, PlayerAction, SessionStatus};
use serde::{Deserialize, Serialize};

/// How the live session was replaced without a reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestoreSource {
    /// Popped from the undo history.
    Undo,
    /// Loaded from a repository slot.
    Slot { key: String },
    /// Replaced by a fresh blank session.
    Reset,
}

/// Events related to session state changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The session left `idle` with a named player and first enemy.
    Started { session: Box<GameSession> },

    /// An action was accepted by the engine
    ActionApplied {
        /// Nonce the action was reduced at
        nonce: u64,
        action: PlayerAction,
        before: Box<GameSession>,
        after: Box<GameSession>,
    },

    /// An action was rejected; the snapshot is unchanged apart from the log
    ActionRejected {
        nonce: u64,
        action: PlayerAction,
        rejection: ActionRejection,
    },

    /// The session reached a terminal status
    Ended {
        status: SessionStatus,
        wave: u32,
        turn: u32,
    },

    Restored {
        source: RestoreSource,
        session: Box<GameSession>,
    },

    Saved { key: String, nonce: u64 },
}

/// Log entries appended by one transition, in causal order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub session_id: String,
    pub entries: Vec<LogEntry>,
}
