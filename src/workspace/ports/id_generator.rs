//! Identifier source port.

use uuid::Uuid;

/// Source of fresh identifiers for tasks, sprints, and notes.
///
/// Implementations must not repeat a value within one workspace session.
pub trait IdGenerator {
    /// Returns the next identifier.
    fn next_uuid(&self) -> Uuid;
}
