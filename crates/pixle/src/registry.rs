//! The item registry.
//!
//! Owns every tracked [`Item`]. Callers keep [`ItemId`] handles; once an
//! item is removed, looking its id up again is a reportable
//! [`PixleError::RegistryLookup`], never a dangling access.

use crate::error::{PixleError, PixleResult};
use crate::id::ItemId;
use crate::item::Item;
use pixle_core::alloc::HashMap;

/// Registry mapping item ids to the items they name.
pub struct ItemRegistry {
    items: HashMap<ItemId, Item>,
}

impl ItemRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Register an item. Fails if its id is already taken.
    pub fn insert(&mut self, item: Item) -> PixleResult<()> {
        let id = item.id();
        if self.items.contains_key(&id) {
            return Err(PixleError::DuplicateId { id });
        }
        self.items.insert(id, item);
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn resolve(&self, id: ItemId) -> PixleResult<&Item> {
        self.items.get(&id).ok_or(PixleError::RegistryLookup { id })
    }

    pub fn resolve_mut(&mut self, id: ItemId) -> PixleResult<&mut Item> {
        self.items
            .get_mut(&id)
            .ok_or(PixleError::RegistryLookup { id })
    }

    /// Remove an item, handing ownership back to the caller.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Get the number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all registered items, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.items.iter().map(|(&id, item)| (id, item))
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultLabel;
    use crate::item::ItemOptions;
    use crate::kind::BUTTON;
    use crate::testing::IdOnly;

    fn staged_button(toolkit: &mut IdOnly, options: ItemOptions) -> Item {
        Item::stage(&BUTTON, options.staged(), toolkit, DefaultLabel::KindName, true).unwrap()
    }

    #[test]
    fn test_insert_and_resolve() {
        let mut toolkit = IdOnly(0);
        let mut registry = ItemRegistry::new();
        let item = staged_button(&mut toolkit, ItemOptions::new());
        let id = item.id();

        registry.insert(item).unwrap();

        assert!(registry.contains(id));
        assert_eq!(registry.resolve(id).unwrap().id(), id);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut toolkit = IdOnly(0);
        let mut registry = ItemRegistry::new();
        registry
            .insert(staged_button(&mut toolkit, ItemOptions::new().id(7u64)))
            .unwrap();

        let err = registry
            .insert(staged_button(&mut toolkit, ItemOptions::new().id(7u64)))
            .unwrap_err();
        assert_eq!(err, PixleError::DuplicateId { id: ItemId::from_raw(7) });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_removed_handle_is_reported() {
        let mut toolkit = IdOnly(0);
        let mut registry = ItemRegistry::new();
        let item = staged_button(&mut toolkit, ItemOptions::new());
        let id = item.id();
        registry.insert(item).unwrap();

        assert!(registry.remove(id).is_some());
        assert!(registry.remove(id).is_none());
        assert_eq!(
            registry.resolve(id).unwrap_err(),
            PixleError::RegistryLookup { id }
        );
        assert!(registry.is_empty());
    }
}
