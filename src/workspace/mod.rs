//! Application layer tying the board and notes to their collaborators.
//!
//! The [`services::Workspace`] owns one board and one note book, loads them
//! from a [`ports::SnapshotStore`] at startup, and writes the affected
//! collection back after every change. Time comes from a
//! [`mockable::Clock`] and new identifiers from a [`ports::IdGenerator`],
//! both injected so hosts and tests can substitute deterministic versions.
//!
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
