//! Step definitions for sprint board scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
