//! The item system: toolkit, kind registry and item registry in one place.

use crate::config::{ItemSystemConfig, OrphanPolicy};
use crate::error::{PixleError, PixleResult};
use crate::id::ItemId;
use crate::item::{Item, ItemOptions};
use crate::kind::{ItemKind, KindRegistry};
use crate::registry::ItemRegistry;
use crate::toolkit::{Slot, Toolkit};
use crate::value::{Options, Value};
use pixle_core::profiling::profile_function;

/// Owns the toolkit binding and every tracked item.
///
/// All methods must be called from the UI thread that drives the toolkit.
/// Item handles are plain [`ItemId`]s; using a handle after
/// [`delete`](Self::delete) reports [`PixleError::RegistryLookup`].
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = ItemSystem::new(toolkit);
///
/// let window = ui.create(&kind::WINDOW, ItemOptions::new().label("Settings"))?;
/// let button = ui.create(&kind::BUTTON, ItemOptions::new().parent(window))?;
///
/// ui.set(button, "label", "Apply".into())?;
/// assert_eq!(ui.children(window)?.len(), 1);
///
/// ui.delete(window)?;
/// ```
pub struct ItemSystem<T: Toolkit> {
    toolkit: T,
    kinds: KindRegistry,
    items: ItemRegistry,
    config: ItemSystemConfig,
}

impl<T: Toolkit> ItemSystem<T> {
    /// Create an item system with the built-in kinds and default config.
    pub fn new(toolkit: T) -> Self {
        Self::with_config(toolkit, ItemSystemConfig::default())
    }

    pub fn with_config(toolkit: T, config: ItemSystemConfig) -> Self {
        Self {
            toolkit,
            kinds: KindRegistry::with_builtin_kinds(),
            items: ItemRegistry::new(),
            config,
        }
    }

    /// Make a custom kind available to [`create`](Self::create).
    pub fn register_kind(&mut self, kind: &'static ItemKind) {
        self.kinds.register(kind);
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn config(&self) -> &ItemSystemConfig {
        &self.config
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Direct toolkit access, e.g. for driving untracked items.
    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// Create a tracked item and return its handle.
    ///
    /// The item is registered before it is committed. Unless
    /// `options.stage` is set it is committed immediately. If the creation
    /// call fails nothing exists in the toolkit and the entry is removed
    /// again. If only the initial `set_value` fails the item stays
    /// registered and committed, and the error names its id.
    pub fn create(&mut self, kind: &'static ItemKind, options: ItemOptions) -> PixleResult<ItemId> {
        profile_function!();
        self.ensure_registered(kind)?;
        let stage = options.stage;
        let item = Item::stage(kind, options, &mut self.toolkit, self.config.default_label, true)?;
        let id = item.id();
        self.items.insert(item)?;
        tracing::debug!("Registered {} item {}", kind.name, id);

        if !stage {
            if let Err(err) = self.commit_setup(id) {
                if self.items.get(id).is_some_and(|item| !item.is_initialized()) {
                    self.items.remove(id);
                    tracing::debug!("Dropped {} item {} after failed creation", kind.name, id);
                }
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Create a tracked item of a kind looked up by name.
    pub fn create_by_name(&mut self, name: &str, options: ItemOptions) -> PixleResult<ItemId> {
        let kind = self.kinds.get(name).ok_or_else(|| PixleError::UnknownKind {
            name: name.to_string(),
        })?;
        self.create(kind, options)
    }

    /// Create an item that is never registered.
    ///
    /// The caller owns the returned item and is responsible for deleting it
    /// with [`delete_untracked`](Self::delete_untracked). A parent's
    /// [`children`](Self::children) cannot resolve it.
    pub fn create_untracked(
        &mut self,
        kind: &'static ItemKind,
        options: ItemOptions,
    ) -> PixleResult<Item> {
        profile_function!();
        self.ensure_registered(kind)?;
        let stage = options.stage;
        let mut item =
            Item::stage(kind, options, &mut self.toolkit, self.config.default_label, false)?;
        if !stage {
            item.commit_setup(&mut self.toolkit)?;
        }
        Ok(item)
    }

    /// Commit a staged item. Fails with [`PixleError::Lifecycle`] if it was
    /// already committed.
    pub fn commit_setup(&mut self, id: ItemId) -> PixleResult<()> {
        self.items.resolve_mut(id)?.commit_setup(&mut self.toolkit)
    }

    pub fn item(&self, id: ItemId) -> PixleResult<&Item> {
        self.items.resolve(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(id)
    }

    pub fn get(&self, id: ItemId, key: &str) -> PixleResult<Value> {
        self.items.resolve(id)?.get(&self.toolkit, key)
    }

    pub fn set(&mut self, id: ItemId, key: &str, value: Value) -> PixleResult<()> {
        self.items.resolve_mut(id)?.set(&mut self.toolkit, key, value)
    }

    pub fn configure(&mut self, id: ItemId, options: Options) -> PixleResult<()> {
        self.items
            .resolve_mut(id)?
            .configure(&mut self.toolkit, options)
    }

    pub fn configuration(&self, id: ItemId) -> PixleResult<Options> {
        self.items.resolve(id)?.configuration(&self.toolkit)
    }

    pub fn configuration_option(&self, id: ItemId, option: &str) -> PixleResult<Value> {
        self.items
            .resolve(id)?
            .configuration_option(&self.toolkit, option)
    }

    pub fn describe(&self, id: ItemId) -> PixleResult<String> {
        self.items.resolve(id)?.describe(&self.toolkit)
    }

    /// Structural children of `id` (slots 0 to 2, in toolkit order).
    ///
    /// `id` itself does not need to be registered, so this also works for
    /// untracked parents.
    pub fn children(&self, id: ItemId) -> PixleResult<Vec<&Item>> {
        self.resolve_slots(id, &Slot::STRUCTURAL)
    }

    /// Event handlers attached to `id` (slot 3).
    pub fn handlers(&self, id: ItemId) -> PixleResult<Vec<&Item>> {
        self.resolve_slots(id, &[Slot::Handlers])
    }

    /// Delete an item and, first, all of its structural children.
    ///
    /// The toolkit's "already removed" condition is ignored for every item
    /// in the tree, so deleting twice is not an error.
    pub fn delete(&mut self, id: ItemId) -> PixleResult<()> {
        profile_function!();
        self.delete_tree(id)
    }

    /// Delete an untracked item and its structural children.
    pub fn delete_untracked(&mut self, item: Item) -> PixleResult<()> {
        self.delete_tree(item.id())
    }

    /// Create a tracked copy of `id` with `overrides` layered over its
    /// current configuration. The copy gets a fresh id and is committed
    /// immediately; the original is left untouched.
    ///
    /// Unset (`None`) options are not copied, and neither is a position
    /// that only came from layout.
    pub fn duplicate(&mut self, id: ItemId, overrides: Options) -> PixleResult<ItemId> {
        let item = self.items.resolve(id)?;
        let kind = item.kind();
        let mut options = item.configuration(&self.toolkit)?;
        options.shift_remove("id");
        if !item.has_explicit_position() {
            options.shift_remove("pos");
        }
        options.retain(|_, value| !value.is_none());
        options.extend(overrides);

        let copy = self.create(kind, ItemOptions::from_options(options))?;
        tracing::debug!("Duplicated item {} as {}", id, copy);
        Ok(copy)
    }

    fn ensure_registered(&self, kind: &'static ItemKind) -> PixleResult<()> {
        if self.kinds.contains(kind) {
            Ok(())
        } else {
            Err(PixleError::UnknownKind {
                name: kind.name.to_string(),
            })
        }
    }

    fn resolve_slots(&self, id: ItemId, slots: &[Slot]) -> PixleResult<Vec<&Item>> {
        profile_function!();
        let info = self.toolkit.get_info(id)?;
        let mut resolved = Vec::new();
        for &slot in slots {
            for &child in info.slot(slot) {
                match self.items.get(child) {
                    Some(item) => resolved.push(item),
                    None => match self.config.orphan_policy {
                        OrphanPolicy::Fail => return Err(PixleError::RegistryLookup { id: child }),
                        OrphanPolicy::Skip => {
                            tracing::warn!("Skipping unregistered child {} of item {}", child, id);
                        }
                    },
                }
            }
        }
        Ok(resolved)
    }

    fn delete_tree(&mut self, id: ItemId) -> PixleResult<()> {
        let children: Vec<ItemId> = match self.children(id) {
            Ok(children) => children.into_iter().map(Item::id).collect(),
            Err(err) if err.is_not_found() => Vec::new(),
            Err(err) => return Err(err),
        };

        for child in children {
            match self.delete_tree(child) {
                Err(err) if err.is_not_found() => {
                    tracing::trace!("Child {} of item {} was already removed", child, id);
                }
                other => other?,
            }
        }

        match self.toolkit.delete_item(id) {
            Ok(()) => {}
            Err(err) => {
                let err = PixleError::from(err);
                if !err.is_not_found() {
                    return Err(err);
                }
                tracing::trace!("Item {} was already removed from the toolkit", id);
            }
        }

        if self.items.remove(id).is_some() {
            tracing::debug!("Deleted item {}", id);
        }
        Ok(())
    }
}
