//! Test utilities for Pixle.
//!
//! The main component is `MockToolkit` (requires the `mock` feature): an
//! in-memory [`Toolkit`](pixle::Toolkit) that keeps a widget tree the way a
//! real toolkit would and records every call made to it.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use pixle::{ItemOptions, ItemSystem, kind};
//! use pixle_test_utils::MockToolkit;
//!
//! let mut ui = ItemSystem::new(MockToolkit::new());
//! let window = ui.create(&kind::WINDOW, ItemOptions::new()).unwrap();
//!
//! assert!(ui.toolkit().exists(window));
//! assert_eq!(ui.toolkit().count_creates(), 1);
//! # }
//! ```

#[cfg(feature = "mock")]
pub mod mock_toolkit;

#[cfg(feature = "mock")]
pub use mock_toolkit::*;
