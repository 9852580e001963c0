//! Unit tests for the workspace module.
