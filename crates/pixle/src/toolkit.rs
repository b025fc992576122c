//! The capability interface consumed from the wrapped GUI toolkit.
//!
//! Everything the item layer does to a widget goes through [`Toolkit`]. The
//! trait is object safe so a real binding and the mock used in tests are
//! interchangeable.

use crate::error::ToolkitResult;
use crate::id::ItemId;
use crate::value::{Options, Value};

/// Number of child-list buckets the toolkit keeps per item.
pub const SLOT_COUNT: usize = 4;

/// One of the toolkit's categorical child-list buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// File extensions, font range hints, node links, annotations, drag
    /// lines/points, legends and table columns.
    Special = 0,
    /// All other app items.
    Common = 1,
    /// Draw items.
    Drawing = 2,
    /// Attached event handlers.
    Handlers = 3,
}

impl Slot {
    /// Slots holding structural children, in the order they are reported.
    pub const STRUCTURAL: [Slot; 3] = [Slot::Special, Slot::Common, Slot::Drawing];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Tree information reported by [`Toolkit::get_info`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemInfo {
    /// Live parent, `None` for root items.
    pub parent: Option<ItemId>,
    /// Child ids per slot, in toolkit order.
    pub children: [Vec<ItemId>; SLOT_COUNT],
}

impl ItemInfo {
    pub fn slot(&self, slot: Slot) -> &[ItemId] {
        &self.children[slot.index()]
    }
}

/// Runtime state reported by [`Toolkit::get_state`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemState {
    /// Screen position, if the item has been laid out.
    pub pos: Option<[f32; 2]>,
    pub visible: bool,
    pub hovered: bool,
    pub active: bool,
}

/// Procedural API of the wrapped toolkit.
///
/// # Threading
///
/// Toolkits of this kind own global UI state that must only be touched from
/// the UI thread. Implementations are not required to be `Send`, and every
/// call is a blocking round-trip.
pub trait Toolkit {
    /// Produce a new process-wide unique item id.
    fn generate_id(&mut self) -> ItemId;

    /// Create a widget using the toolkit creation call named `command`.
    fn create_widget(&mut self, command: &str, id: ItemId, options: &Options) -> ToolkitResult<()>;

    /// Apply configuration options to a live item.
    fn configure(&mut self, id: ItemId, options: &Options) -> ToolkitResult<()>;

    /// The item's current configuration options.
    fn get_configuration(&self, id: ItemId) -> ToolkitResult<Options>;

    fn get_info(&self, id: ItemId) -> ToolkitResult<ItemInfo>;

    fn get_state(&self, id: ItemId) -> ToolkitResult<ItemState>;

    fn get_value(&self, id: ItemId) -> ToolkitResult<Value>;

    fn set_value(&mut self, id: ItemId, value: Value) -> ToolkitResult<()>;

    /// Re-parent a live item.
    fn move_item(&mut self, id: ItemId, parent: ItemId) -> ToolkitResult<()>;

    /// Remove an item. May fail with [`ToolkitError::NotFound`](crate::ToolkitError::NotFound)
    /// if it is already gone.
    fn delete_item(&mut self, id: ItemId) -> ToolkitResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_slots_exclude_handlers() {
        assert!(!Slot::STRUCTURAL.contains(&Slot::Handlers));
        assert_eq!(Slot::Handlers.index(), SLOT_COUNT - 1);
    }

    #[test]
    fn test_info_slot_access() {
        let mut info = ItemInfo::default();
        info.children[Slot::Drawing.index()].push(ItemId::from_raw(5));
        assert_eq!(info.slot(Slot::Drawing), &[ItemId::from_raw(5)]);
        assert!(info.slot(Slot::Common).is_empty());
    }
}
