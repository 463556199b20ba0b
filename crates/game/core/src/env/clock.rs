/// Wall-clock oracle for session creation time and log timestamps.
///
/// Timestamps are presentation data only; no rule reads them.
pub trait ClockOracle: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Clock frozen at a single instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl ClockOracle for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
