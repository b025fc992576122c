//! Item handles.

use std::fmt;

/// An opaque handle identifying one item, unique process-wide.
///
/// Ids are either supplied by the caller or generated by the toolkit
/// through [`Toolkit::generate_id`](crate::Toolkit::generate_id). The raw
/// value `0` is the toolkit's "no item" marker and never names a live item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// The toolkit's "no item" value.
    pub const NONE: ItemId = ItemId(0);

    /// Create an item id from a raw toolkit handle.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this is the "no item" marker.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_marker() {
        assert!(ItemId::NONE.is_none());
        assert!(!ItemId::from_raw(7).is_none());
    }

    #[test]
    fn test_raw_round_trip() {
        let id: ItemId = 42u64.into();
        assert_eq!(id.as_u64(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }
}
