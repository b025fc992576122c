//! Error types for the item layer.

use crate::id::ItemId;
use std::fmt;

/// Errors reported by a [`Toolkit`](crate::Toolkit) implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitError {
    /// The toolkit has no item with this id (e.g. it was already removed).
    NotFound(ItemId),

    /// Any other toolkit-side failure.
    Failed {
        /// The item the call targeted.
        id: ItemId,
        /// Description supplied by the toolkit.
        message: String,
    },
}

impl fmt::Display for ToolkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolkitError::NotFound(id) => write!(f, "Item {} does not exist in the toolkit", id),
            ToolkitError::Failed { id, message } => {
                write!(f, "Toolkit call for item {} failed: {}", id, message)
            }
        }
    }
}

impl std::error::Error for ToolkitError {}

/// Result type for toolkit calls.
pub type ToolkitResult<T> = Result<T, ToolkitError>;

/// Errors that can occur while managing items.
#[derive(Debug, Clone, PartialEq)]
pub enum PixleError {
    /// The key is absent from the item's live view or staged configuration.
    MissingOption {
        id: ItemId,
        key: String,
    },

    /// The toolkit reported the item as already removed.
    NotFound {
        id: ItemId,
    },

    /// The operation does not fit the item's lifecycle state.
    Lifecycle {
        id: ItemId,
        reason: &'static str,
    },

    /// The id is not present in the item registry.
    RegistryLookup {
        id: ItemId,
    },

    /// An item with this id is already registered.
    DuplicateId {
        id: ItemId,
    },

    /// No kind with this name was registered.
    UnknownKind {
        name: String,
    },

    /// The value has the wrong shape for the key.
    InvalidValue {
        key: String,
        expected: &'static str,
    },

    /// The key names a built-in field that cannot be assigned.
    ReadOnly {
        key: String,
    },

    /// Any other toolkit failure.
    Toolkit {
        id: ItemId,
        message: String,
    },
}

impl fmt::Display for PixleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixleError::MissingOption { id, key } => {
                write!(f, "Item {} has no option '{}'", id, key)
            }
            PixleError::NotFound { id } => write!(f, "Item {} was already removed", id),
            PixleError::Lifecycle { id, reason } => write!(f, "Item {}: {}", id, reason),
            PixleError::RegistryLookup { id } => {
                write!(f, "Item {} is not in the item registry", id)
            }
            PixleError::DuplicateId { id } => {
                write!(f, "An item with id {} is already registered", id)
            }
            PixleError::UnknownKind { name } => write!(f, "Unknown item kind: {}", name),
            PixleError::InvalidValue { key, expected } => {
                write!(f, "Invalid value for '{}': expected {}", key, expected)
            }
            PixleError::ReadOnly { key } => write!(f, "Option '{}' is read-only", key),
            PixleError::Toolkit { id, message } => {
                write!(f, "Toolkit error for item {}: {}", id, message)
            }
        }
    }
}

impl std::error::Error for PixleError {}

impl From<ToolkitError> for PixleError {
    fn from(err: ToolkitError) -> Self {
        match err {
            ToolkitError::NotFound(id) => PixleError::NotFound { id },
            ToolkitError::Failed { id, message } => PixleError::Toolkit { id, message },
        }
    }
}

impl PixleError {
    /// Whether this is the toolkit's "already removed" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PixleError::NotFound { .. })
    }
}

/// Result type alias for item operations.
pub type PixleResult<T> = Result<T, PixleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolkit_not_found_maps_to_not_found() {
        let err: PixleError = ToolkitError::NotFound(ItemId::from_raw(9)).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Item 9 was already removed");
    }

    #[test]
    fn test_toolkit_failure_keeps_message() {
        let err: PixleError = ToolkitError::Failed {
            id: ItemId::from_raw(2),
            message: "bad option".into(),
        }
        .into();
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Toolkit error for item 2: bad option");
    }
}
