//! Injected collaborators of the engine.
//!
//! The reducer never reaches for ambient randomness or time. Both come in
//! through [`GameEnv`], so a reduction is a pure function of the snapshot,
//! the action and these oracles.
mod clock;
mod rng;

pub use clock::{ClockOracle, FixedClock};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, compute_seed};

/// Oracles required by every engine entry point.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    pub rng: &'a dyn RngOracle,
    pub clock: &'a dyn ClockOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, clock: &'a dyn ClockOracle) -> Self {
        Self { rng, clock }
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("now_millis", &self.clock.now_millis())
            .finish_non_exhaustive()
    }
}

/// Restricts `value` to `[min, max]`. Unlike [`Ord::clamp`] it never panics:
/// an inverted range resolves to `min`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }
    value.max(min).min(max)
}
