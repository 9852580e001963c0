//! Sprintboard: single-user sprint planning and kanban state.
//!
//! This crate keeps an unassigned task pool, time-boxed sprints with three
//! kanban columns each, and free-form notes, and persists each collection
//! as a JSON snapshot after every change.
//!
//! # Architecture
//!
//! Sprintboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure state transitions with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and identifiers
//! - **Adapters**: Concrete implementations of ports (directory, memory)
//!
//! # Modules
//!
//! - [`board`]: Task pool, sprints, columns, and status derivation
//! - [`notes`]: Notes with normalised tags
//! - [`workspace`]: Loading, persisting, and orchestrating both
//! - [`timestamp`]: Snapshot timestamp encoding

pub mod board;
pub mod notes;
pub mod timestamp;
pub mod workspace;
