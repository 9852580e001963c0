//! Unit tests for the notes module.
