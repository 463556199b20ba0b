//! Persistence collaborator for session snapshots.
//!
//! Repositories are keyed save slots. The simulation worker autosaves into
//! one of them and restores from any of them; the engine never sees the
//! storage medium.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSnapshotRepository, SaveFormat};
pub use memory::InMemorySnapshotRepo;
pub use traits::SnapshotRepository;
