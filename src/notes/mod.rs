//! Free-form notes kept beside the sprint boards.
//!
//! Notes are an independent keyed list with no references to tasks or
//! sprints.

pub mod domain;

#[cfg(test)]
mod tests;
