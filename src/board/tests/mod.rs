//! Unit tests for the board module.
//!
//! Tests are organised by operation family: pool management, sprint
//! lifecycle, in-board movement, status derivation, and loading.

mod load_tests;
