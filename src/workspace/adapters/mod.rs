//! Adapter implementations for workspace ports.

pub mod clock;
pub mod directory;
pub mod ids;
pub mod memory;

pub use clock::ManualClock;
pub use directory::DirectorySnapshotStore;
pub use ids::{RandomIdGenerator, SequentialIdGenerator};
pub use memory::InMemorySnapshotStore;
