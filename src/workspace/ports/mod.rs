//! Port contracts for the workspace.
//!
//! Ports define infrastructure-agnostic interfaces used by the workspace
//! service.

pub mod id_generator;
pub mod snapshot_store;

pub use id_generator::IdGenerator;
pub use snapshot_store::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};
