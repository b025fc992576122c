//! Pixle - retained item handles over an immediate-mode GUI toolkit
//!
//! Pixle lets callers build and mutate toolkit widgets ("items") through
//! option reads and writes instead of procedural toolkit calls:
//!
//! - Items can be *staged*: options are buffered locally and the widget is
//!   created on [`Item::commit_setup`]
//! - Every item kind declares its configuration keys up front
//! - Reads and writes of declared keys on committed items go straight to
//!   the toolkit; every constructor option reaches the creation call, and
//!   undeclared keys written later are plain per-item state
//! - Tracked items live in an id-keyed registry owned by [`ItemSystem`]
//!
//! The toolkit itself is reached only through the [`Toolkit`] trait.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pixle::{ItemOptions, ItemSystem, kind};
//!
//! let mut ui = ItemSystem::new(toolkit);
//!
//! let window = ui.create(&kind::WINDOW, ItemOptions::new())?;
//! let name = ui.create(
//!     &kind::INPUT_TEXT,
//!     ItemOptions::new().parent(window).staged().with("hint", "Name"),
//! )?;
//! ui.set(name, "value", "Ada".into())?;
//! ui.commit_setup(name)?;
//!
//! assert_eq!(ui.configuration_option(window, "label")?, "Window".into());
//! ```
//!
//! ## Threading
//!
//! The wrapped toolkit owns global UI state. All item operations must run
//! on the thread that drives the toolkit's event loop.

pub mod config;
pub mod error;
pub mod id;
pub mod item;
pub mod kind;
pub mod registry;
pub mod system;
pub mod toolkit;
pub mod value;

#[cfg(test)]
mod testing;

pub use config::{DefaultLabel, ItemSystemConfig, OrphanPolicy};
pub use error::{PixleError, PixleResult, ToolkitError, ToolkitResult};
pub use id::ItemId;
pub use item::{Item, ItemOptions};
pub use kind::{ItemKind, KindRegistry};
pub use registry::ItemRegistry;
pub use system::ItemSystem;
pub use toolkit::{ItemInfo, ItemState, SLOT_COUNT, Slot, Toolkit};
pub use value::{Options, Value};

pub use pixle_core::logging;
