//! RNG oracle for deterministic random number generation.
//!
//! The engine never owns an entropy source. Every roll is derived from the
//! session seed, the session nonce and the roll's position within the
//! reduction, then fed through an injected [`RngOracle`].
//!
//! # Determinism
//!
//! Given the same snapshot, action and oracle, a reduction produces the same
//! result. Tests swap in constant oracles to pin exact outcomes.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state, a single multiply, an
/// xorshift and a rotate. Stateless here; the caller supplies the state as
/// the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that returns the same value for every seed.
///
/// `FixedRng(0)` makes every chance succeed and every variance roll its
/// minimum; `FixedRng(u32::MAX)` makes every chance fail and every variance
/// roll (just under) its maximum.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub u32);

impl FixedRng {
    pub const LOW: FixedRng = FixedRng(0);
    pub const HIGH: FixedRng = FixedRng(u32::MAX);
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Compute a deterministic seed for one roll.
///
/// * `session_seed` - Base seed fixed at session creation
/// * `nonce` - Accepted-action counter
/// * `stream` - Separates independent roll sequences within one action
/// * `index` - Position of the roll within its stream
pub fn compute_seed(session_seed: u64, nonce: u64, stream: u32, index: u32) -> u64 {
    // SplitMix64 / FxHash style multipliers
    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (index as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Per-reduction roller. Each call consumes the next index of its stream.
pub struct Dice<'a> {
    oracle: &'a dyn RngOracle,
    session_seed: u64,
    nonce: u64,
    stream: u32,
    index: u32,
}

impl<'a> Dice<'a> {
    pub fn new(oracle: &'a dyn RngOracle, session_seed: u64, nonce: u64, stream: u32) -> Self {
        Self {
            oracle,
            session_seed,
            nonce,
            stream,
            index: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.session_seed, self.nonce, self.stream, self.index);
        self.index = self.index.wrapping_add(1);
        seed
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        let seed = self.next_seed();
        self.oracle.unit(seed)
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform integer in `[min, max]`.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let seed = self.next_seed();
        self.oracle.range(seed, min, max)
    }

    /// Uniform float in `[low, high)`.
    pub fn variance(&mut self, low: f64, high: f64) -> f64 {
        low + self.unit() * (high - low)
    }

    /// Uniformly picks one element, or `None` for an empty slice.
    pub fn pick<'s, T>(&mut self, items: &'s [T]) -> Option<&'s T> {
        if items.is_empty() {
            return None;
        }
        let last = (items.len() - 1) as u32;
        items.get(self.range(0, last) as usize)
    }
}
