//! Deterministic combat engine for a wave-defense farming saga.
//!
//! `saga-core` defines the canonical rules (actions, entity factories, skill
//! registry, combat math, wave progression) and exposes pure APIs that the
//! runtime and offline tools share. Every state change flows through
//! [`engine::GameEngine`], which maps a [`GameSession`] snapshot and a
//! [`PlayerAction`] to a new snapshot.
pub mod action;
pub mod config;
pub mod content;
pub mod engine;
pub mod env;
pub mod state;

pub use action::PlayerAction;
pub use config::GameConfig;
pub use content::{
    SkillContext, SkillDefinition, SkillId, SkillOutcome, SkillRegistry, UpgradeId,
    create_base_player, spawn_enemy,
};
pub use engine::{ActionRejection, GameEngine, Transition};
pub use env::{ClockOracle, Dice, FixedClock, FixedRng, GameEnv, PcgRng, RngOracle, compute_seed};
pub use state::{
    Archetype, BuffId, BuffInstance, BuffTemplate, DecisionEffect, DecisionId, DecisionKind,
    DecisionOption, EnemyId, EnemyState, GameSession, LogEntry, PendingDecision, PlayerState,
    SessionCounters, SessionStatus, SkillInstance, StatKind, Tone,
};
