//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the live session and serializes every command
//! against it; clients only ever see snapshots.

mod simulation;

pub use simulation::{Command, SimulationWorker};
