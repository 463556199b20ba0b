//! Session reducer and its components.
//!
//! The [`GameEngine`] is the only way to obtain a new [`GameSession`]. Every
//! entry point takes the current snapshot by reference and returns a fresh
//! one; the input is never mutated, so callers can keep it for undo or
//! comparison. Randomness and time come from the injected [`GameEnv`].
//!
//! A reduction resolves in causal order:
//!
//! 1. the player action (attack, heal, skip, skill or decision)
//! 2. the wave advance if the enemy fell, otherwise the enemy counter-turn
//! 3. end-of-turn ticking (buffs, cooldowns, regeneration) unless the player
//!    fell or the action was a decision
mod buffs;
mod combat;
mod errors;
mod journal;
mod reducer;
mod waves;

pub use buffs::{apply_buff, expire_buff, tick_buffs};
pub use combat::{POISON, VULNERABLE, enemy_damage, golem_mitigation, player_damage};
pub use errors::ActionRejection;
pub use journal::Journal;
pub use waves::stats_summary;

use crate::GameConfig;
use crate::action::PlayerAction;
use crate::env::GameEnv;
use crate::state::GameSession;
use reducer::SessionReducer;

/// Result of a reduction: the next snapshot and, if the action was not
/// applied, why.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub session: GameSession,
    pub rejection: Option<ActionRejection>,
}

impl Transition {
    fn accepted(session: GameSession) -> Self {
        Self {
            session,
            rejection: None,
        }
    }

    fn rejected(session: GameSession, rejection: ActionRejection) -> Self {
        Self {
            session,
            rejection: Some(rejection),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Pure state-transition function over [`GameSession`] snapshots.
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>, config: &'a GameConfig) -> Self {
        Self { env, config }
    }

    /// Idle session with the opening log line and no enemy.
    pub fn blank_session(&self, id: impl Into<String>, seed: u64) -> GameSession {
        let now = self.env.clock.now_millis();
        let mut session = GameSession::blank(id, now, seed);
        let mut journal = Journal::new();
        journal.system("A hush falls over the farm as you ready your tools.");
        journal.commit(&mut session, now, self.config.log_capacity);
        session
    }

    /// Promotes an idle session to running with a named player and the first
    /// enemy. Blank names fall back to [`GameConfig::default_player_name`].
    pub fn start(&self, session: &GameSession, name: &str) -> Transition {
        SessionReducer::new(self.env, self.config, session).start(name)
    }

    /// Blank session started in one step.
    pub fn new_session(&self, id: impl Into<String>, seed: u64, name: &str) -> GameSession {
        let blank = self.blank_session(id, seed);
        self.start(&blank, name).session
    }

    /// Applies one player action.
    ///
    /// Idle and terminal sessions come back unchanged. Invalid actions come
    /// back unchanged apart from one system log line; neither `turn` nor
    /// `nonce` advance.
    pub fn dispatch(&self, session: &GameSession, action: &PlayerAction) -> Transition {
        SessionReducer::new(self.env, self.config, session).dispatch(action)
    }
}
