//! Topic-based event bus for runtime events.
//!
//! The presentation collaborator subscribes to [`Topic::Log`] for narration
//! and to [`Topic::Session`] for snapshots and lifecycle changes.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{LogEvent, RestoreSource, SessionEvent};
