//! Pixle Core
//!
//! Shared utilities for the Pixle item layer: hash collections, logging
//! setup and profiling scopes.

pub mod alloc;
pub mod logging;
pub mod profiling;
