//! Runtime orchestration for the Battle Farm Saga session engine.
//!
//! This crate wires together the action provider abstraction, oracle access,
//! snapshot repositories, and the simulation worker into a cohesive runtime
//! API. Consumers embed [`Runtime`] to drive a session, subscribe to events,
//! and manage save slots through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, Result, RuntimeError, RuntimeHandle, ScriptedActionProvider};
pub use events::{Event, EventBus, LogEvent, RestoreSource, SessionEvent, Topic};
pub use oracle::{OracleManager, SystemClock};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SaveFormat, SnapshotRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
