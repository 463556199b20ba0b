//! Runtime providers of the engine's injected collaborators.
//!
//! [`OracleManager`] owns the RNG and clock oracles and lends them to the
//! engine as a [`saga_core::GameEnv`] on every reduction.
mod clock;

use std::sync::Arc;

use saga_core::{ClockOracle, GameEnv, PcgRng, RngOracle};

pub use clock::SystemClock;

/// Manages the oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) rng: Arc<dyn RngOracle>,
    pub(crate) clock: Arc<dyn ClockOracle>,
}

impl OracleManager {
    pub fn new(rng: Arc<dyn RngOracle>, clock: Arc<dyn ClockOracle>) -> Self {
        Self { rng, clock }
    }

    /// Replaces the clock, e.g. with a fixed one in tests.
    pub fn with_clock(mut self, clock: Arc<dyn ClockOracle>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the RNG oracle.
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Borrows the oracles as a [`GameEnv`] for saga-core.
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::new(self.rng.as_ref(), self.clock.as_ref())
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }
}

impl Default for OracleManager {
    /// `PcgRng` (stateless) and the system clock.
    fn default() -> Self {
        Self::new(Arc::new(PcgRng), Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager").finish_non_exhaustive()
    }
}
