//! Item kinds and the kind registry.
//!
//! Every concrete widget variant is described by a `'static` [`ItemKind`]:
//! its name (also the default label), the toolkit creation call, the
//! configuration keys it declares, and the function used to create it.
//! Schemas are fixed when the kind is declared; nothing is inferred from
//! the options of the first instance.

use crate::error::ToolkitResult;
use crate::id::ItemId;
use crate::toolkit::Toolkit;
use crate::value::Options;
use pixle_core::alloc::HashMap;
use std::fmt;

/// Configuration keys every kind declares.
pub const COMMON_KEYS: &[&str] = &[
    "label", "parent", "user_data", "width", "height", "show", "enabled", "pos", "indent",
];

/// Creates the toolkit widget for an item of `kind`.
pub type CreateFn = fn(&mut dyn Toolkit, &ItemKind, ItemId, &Options) -> ToolkitResult<()>;

/// Static descriptor of one widget variant.
pub struct ItemKind {
    /// Variant name, used as the default label.
    pub name: &'static str,
    /// Name of the toolkit creation call.
    pub command: &'static str,
    /// Kind-specific configuration keys, in addition to [`COMMON_KEYS`].
    pub keys: &'static [&'static str],
    /// Creation function. Defaults to [`create_with_command`].
    pub create: CreateFn,
}

impl ItemKind {
    pub const fn new(
        name: &'static str,
        command: &'static str,
        keys: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            command,
            keys,
            create: create_with_command,
        }
    }

    /// Replace the creation function.
    pub const fn with_create(mut self, create: CreateFn) -> Self {
        self.create = create;
        self
    }

    /// Whether `key` is a configuration key of this kind.
    ///
    /// `value` and `default_value` are interchangeable: declaring either
    /// declares both.
    pub fn declares(&self, key: &str) -> bool {
        match key {
            "value" | "default_value" => {
                self.keys.contains(&"value") || self.keys.contains(&"default_value")
            }
            _ => COMMON_KEYS.contains(&key) || self.keys.contains(&key),
        }
    }

    /// Whether the kind carries a toolkit value.
    pub fn has_value(&self) -> bool {
        self.declares("default_value")
    }

    /// All declared keys: common keys first, then kind-specific ones.
    pub fn configuration_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        COMMON_KEYS.iter().chain(self.keys.iter()).copied()
    }

    pub(crate) fn create(
        &self,
        toolkit: &mut dyn Toolkit,
        id: ItemId,
        options: &Options,
    ) -> ToolkitResult<()> {
        (self.create)(toolkit, self, id, options)
    }
}

impl fmt::Debug for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemKind")
            .field("name", &self.name)
            .field("command", &self.command)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

/// Default creation function: forwards to [`Toolkit::create_widget`] with
/// the kind's command.
pub fn create_with_command(
    toolkit: &mut dyn Toolkit,
    kind: &ItemKind,
    id: ItemId,
    options: &Options,
) -> ToolkitResult<()> {
    toolkit.create_widget(kind.command, id, options)
}

pub static WINDOW: ItemKind = ItemKind::new(
    "Window",
    "add_window",
    &[
        "min_size",
        "max_size",
        "menubar",
        "collapsed",
        "autosize",
        "no_resize",
        "no_title_bar",
        "no_move",
        "no_scrollbar",
        "no_collapse",
        "modal",
        "popup",
    ],
);

pub static GROUP: ItemKind = ItemKind::new(
    "Group",
    "add_group",
    &["horizontal", "horizontal_spacing", "xoffset"],
);

pub static CHILD_WINDOW: ItemKind = ItemKind::new(
    "ChildWindow",
    "add_child_window",
    &[
        "border",
        "autosize_x",
        "autosize_y",
        "no_scrollbar",
        "horizontal_scrollbar",
        "menubar",
    ],
);

pub static TEXT: ItemKind = ItemKind::new(
    "Text",
    "add_text",
    &["default_value", "wrap", "bullet", "color", "show_label"],
);

pub static BUTTON: ItemKind = ItemKind::new("Button", "add_button", &["small", "arrow", "direction"]);

pub static CHECKBOX: ItemKind = ItemKind::new("Checkbox", "add_checkbox", &["default_value"]);

pub static INPUT_TEXT: ItemKind = ItemKind::new(
    "InputText",
    "add_input_text",
    &[
        "default_value",
        "hint",
        "multiline",
        "no_spaces",
        "uppercase",
        "readonly",
        "password",
        "on_enter",
        "tab_input",
    ],
);

pub static INPUT_INT: ItemKind = ItemKind::new(
    "InputInt",
    "add_input_int",
    &[
        "default_value",
        "step",
        "step_fast",
        "min_value",
        "max_value",
        "min_clamped",
        "max_clamped",
        "readonly",
        "on_enter",
    ],
);

pub static SLIDER_FLOAT: ItemKind = ItemKind::new(
    "SliderFloat",
    "add_slider_float",
    &[
        "default_value",
        "vertical",
        "no_input",
        "clamped",
        "min_value",
        "max_value",
        "format",
    ],
);

pub static COMBO: ItemKind = ItemKind::new(
    "Combo",
    "add_combo",
    &[
        "items",
        "default_value",
        "popup_align_left",
        "no_arrow_button",
        "no_preview",
        "height_mode",
    ],
);

pub static ITEM_HANDLER_REGISTRY: ItemKind =
    ItemKind::new("ItemHandlerRegistry", "add_item_handler_registry", &[]);

pub static ITEM_CLICKED_HANDLER: ItemKind =
    ItemKind::new("ItemClickedHandler", "add_item_clicked_handler", &["button"]);

/// Kinds registered by [`KindRegistry::with_builtin_kinds`].
pub static BUILTIN_KINDS: &[&ItemKind] = &[
    &WINDOW,
    &GROUP,
    &CHILD_WINDOW,
    &TEXT,
    &BUTTON,
    &CHECKBOX,
    &INPUT_TEXT,
    &INPUT_INT,
    &SLIDER_FLOAT,
    &COMBO,
    &ITEM_HANDLER_REGISTRY,
    &ITEM_CLICKED_HANDLER,
];

/// Registry mapping kind names to their descriptors.
pub struct KindRegistry {
    kinds: HashMap<&'static str, &'static ItemKind>,
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            kinds: HashMap::default(),
        }
    }

    /// Create a registry holding every built-in kind.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        for kind in BUILTIN_KINDS {
            registry.register(*kind);
        }
        registry
    }

    /// Register a kind, replacing any previous kind with the same name.
    pub fn register(&mut self, kind: &'static ItemKind) {
        if self.kinds.insert(kind.name, kind).is_some() {
            tracing::warn!("Item kind '{}' registered twice; keeping the latest", kind.name);
        }
    }

    /// Look up a kind by name.
    pub fn get(&self, name: &str) -> Option<&'static ItemKind> {
        self.kinds.get(name).copied()
    }

    /// Whether the exact descriptor is registered under its name.
    pub fn contains(&self, kind: &ItemKind) -> bool {
        self.kinds
            .get(kind.name)
            .is_some_and(|registered| std::ptr::eq(*registered, kind))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::with_builtin_kinds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CUSTOM: ItemKind = ItemKind::new("Knob", "add_knob_float", &["default_value", "min_value"]);

    #[test]
    fn test_common_keys_are_declared() {
        assert!(BUTTON.declares("label"));
        assert!(BUTTON.declares("parent"));
        assert!(BUTTON.declares("arrow"));
        assert!(!BUTTON.declares("hint"));
    }

    #[test]
    fn test_value_aliases_default_value() {
        assert!(CHECKBOX.declares("value"));
        assert!(CHECKBOX.declares("default_value"));
        assert!(CHECKBOX.has_value());
        assert!(!BUTTON.declares("value"));
        assert!(!BUTTON.has_value());
    }

    #[test]
    fn test_configuration_keys_order() {
        let keys: Vec<_> = GROUP.configuration_keys().collect();
        assert_eq!(keys[0], "label");
        assert_eq!(keys.last(), Some(&"xoffset"));
        assert_eq!(keys.len(), COMMON_KEYS.len() + GROUP.keys.len());
    }

    #[test]
    fn test_builtin_registry() {
        let registry = KindRegistry::with_builtin_kinds();
        assert_eq!(registry.len(), BUILTIN_KINDS.len());
        assert!(registry.contains(&WINDOW));
        assert_eq!(registry.get("Button").map(|k| k.command), Some("add_button"));
        assert!(registry.get("Knob").is_none());
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = KindRegistry::new();
        assert!(registry.is_empty());
        registry.register(&CUSTOM);
        assert!(registry.contains(&CUSTOM));
        assert!(CUSTOM.declares("value"));
    }
}
