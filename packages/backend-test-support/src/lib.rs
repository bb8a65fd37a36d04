//! Shared helpers for the backend's integration test binaries.

pub mod logging;
