//! The item state machine.
//!
//! An [`Item`] starts out *staged*: its configuration lives in a local
//! buffer and nothing exists in the toolkit yet. [`Item::commit_setup`]
//! creates the widget and moves the item to the *committed* state, after
//! which reads and writes of declared keys go straight to the toolkit.
//!
//! Constructor options are all forwarded to the creation call. Keys the
//! kind does not declare that are first written after construction never
//! reach the toolkit; they are kept in a per-item attribute bag.

use crate::config::DefaultLabel;
use crate::error::{PixleError, PixleResult};
use crate::id::ItemId;
use crate::kind::ItemKind;
use crate::toolkit::Toolkit;
use crate::value::{Options, Value};
use pixle_core::profiling::profile_function;
use std::fmt::Write as _;

/// Staged buffer slot shared by `value` and `default_value`.
pub const VALUE_SLOT: &str = "default_value";

fn staged_key(key: &str) -> &str {
    match key {
        "value" => VALUE_SLOT,
        other => other,
    }
}

/// The other name of the shared value option.
fn value_alias(key: &str) -> Option<&'static str> {
    match key {
        "value" => Some("default_value"),
        "default_value" => Some("value"),
        _ => None,
    }
}

fn id_value(key: &str, value: &Value) -> PixleResult<Option<ItemId>> {
    value.as_item_id().ok_or_else(|| PixleError::InvalidValue {
        key: key.to_string(),
        expected: "an item id",
    })
}

/// Constructor options for an item.
///
/// `id`, `parent` and `stage` are reserved; every other option is buffered
/// and passed to the creation call, declared or not. `id` and `parent` may
/// also be given as entries of `options`; the dedicated fields take
/// precedence.
#[derive(Debug, Clone, Default)]
pub struct ItemOptions {
    /// Explicit handle. Generated by the toolkit when absent.
    pub id: Option<ItemId>,
    /// Owning item.
    pub parent: Option<ItemId>,
    /// Defer the commit until [`Item::commit_setup`] is called.
    pub stage: bool,
    pub options: Options,
}

impl ItemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn staged(mut self) -> Self {
        self.stage = true;
        self
    }

    pub fn label(self, label: impl Into<String>) -> Self {
        self.with("label", label.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

enum Lifecycle {
    Staged(Options),
    Committed,
}

/// One widget instance.
pub struct Item {
    id: ItemId,
    kind: &'static ItemKind,
    lifecycle: Lifecycle,
    attributes: Options,
    tracked: bool,
    explicit_pos: bool,
}

impl Item {
    /// Build a staged item from constructor options.
    ///
    /// The id is generated through the toolkit when none is supplied. No
    /// widget is created.
    pub fn stage(
        kind: &'static ItemKind,
        options: ItemOptions,
        toolkit: &mut dyn Toolkit,
        default_label: DefaultLabel,
        tracked: bool,
    ) -> PixleResult<Self> {
        let ItemOptions {
            mut id,
            mut parent,
            stage: _,
            options,
        } = options;

        let mut staged = Options::new();
        for (key, value) in options {
            match key.as_str() {
                "id" => {
                    if id.is_none() {
                        id = id_value("id", &value)?;
                    }
                }
                "parent" => {
                    if parent.is_none() {
                        parent = id_value("parent", &value)?;
                    }
                }
                _ if kind.declares(&key) => {
                    staged.insert(staged_key(&key).to_string(), value);
                }
                _ => {
                    staged.insert(key, value);
                }
            }
        }

        if let Some(parent) = parent.filter(|p| !p.is_none()) {
            staged.insert("parent".to_string(), Value::Id(parent));
        }

        if default_label == DefaultLabel::KindName
            && staged.get("label").is_none_or(Value::is_none)
        {
            staged.insert("label".to_string(), Value::from(kind.name));
        }

        let id = match id {
            Some(id) => id,
            None => toolkit.generate_id(),
        };
        let explicit_pos = staged.get("pos").is_some_and(|pos| !pos.is_none());

        Ok(Self {
            id,
            kind,
            lifecycle: Lifecycle::Staged(staged),
            attributes: Options::new(),
            tracked,
            explicit_pos,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &'static ItemKind {
        self.kind
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Committed)
    }

    /// Whether the item lives in an [`ItemRegistry`](crate::ItemRegistry).
    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    /// The staged buffer, present only until the item is committed.
    pub fn staged_configuration(&self) -> Option<&Options> {
        match &self.lifecycle {
            Lifecycle::Staged(staged) => Some(staged),
            Lifecycle::Committed => None,
        }
    }

    /// Caller-defined state stored under undeclared keys.
    pub fn attributes(&self) -> &Options {
        &self.attributes
    }

    /// Whether `pos` was supplied by the caller rather than reported by
    /// layout.
    pub fn has_explicit_position(&self) -> bool {
        self.explicit_pos
    }

    /// Read an option.
    ///
    /// `id` and the attribute bag are answered locally. Otherwise a
    /// committed item reads the toolkit's live view and a staged item reads
    /// its buffer.
    pub fn get(&self, toolkit: &dyn Toolkit, key: &str) -> PixleResult<Value> {
        if key == "id" {
            return Ok(Value::Id(self.id));
        }
        if let Some(value) = self.attributes.get(key) {
            return Ok(value.clone());
        }

        let found = match &self.lifecycle {
            Lifecycle::Committed => {
                let mut view = self.live_view(toolkit)?;
                view.swap_remove(key)
                    .or_else(|| value_alias(key).and_then(|alias| view.swap_remove(alias)))
            }
            Lifecycle::Staged(staged) => staged.get(staged_key(key)).cloned(),
        };
        found.ok_or_else(|| self.missing(key))
    }

    /// Write an option.
    ///
    /// An undeclared key updates the staged buffer while the item is staged
    /// and the key was a constructor option; otherwise it goes to the
    /// attribute bag.
    pub fn set(&mut self, toolkit: &mut dyn Toolkit, key: &str, value: Value) -> PixleResult<()> {
        if key == "id" {
            return Err(PixleError::ReadOnly {
                key: key.to_string(),
            });
        }
        if !self.kind.declares(key) {
            match &mut self.lifecycle {
                Lifecycle::Staged(staged) if staged.contains_key(key) => {
                    staged.insert(key.to_string(), value);
                }
                _ => {
                    self.attributes.insert(key.to_string(), value);
                }
            }
            return Ok(());
        }
        if key == "pos" {
            self.explicit_pos = !value.is_none();
        }

        let id = self.id;
        match &mut self.lifecycle {
            Lifecycle::Staged(staged) => {
                match key {
                    "parent" => match id_value("parent", &value)? {
                        Some(parent) => {
                            staged.insert("parent".to_string(), Value::Id(parent));
                        }
                        None => {
                            staged.shift_remove("parent");
                        }
                    },
                    _ => {
                        staged.insert(staged_key(key).to_string(), value);
                    }
                }
                Ok(())
            }
            Lifecycle::Committed => {
                profile_function!();
                match key {
                    "parent" => set_live_parent(toolkit, id, &value),
                    "value" | "default_value" => {
                        tracing::trace!("set_value on item {}", id);
                        Ok(toolkit.set_value(id, value)?)
                    }
                    _ => {
                        tracing::trace!("configure item {}: {} = {}", id, key, value);
                        let mut options = Options::new();
                        options.insert(key.to_string(), value);
                        Ok(toolkit.configure(id, &options)?)
                    }
                }
            }
        }
    }

    /// Apply several options in order. Not atomic: options applied before a
    /// failure stay applied.
    pub fn configure(&mut self, toolkit: &mut dyn Toolkit, options: Options) -> PixleResult<()> {
        for (key, value) in options {
            self.set(toolkit, &key, value)?;
        }
        Ok(())
    }

    /// Create the widget in the toolkit from the staged buffer.
    ///
    /// The buffered value is applied with a separate `set_value` call after
    /// creation. Fails with [`PixleError::Lifecycle`] when the item was
    /// already committed; if the creation call itself fails the item stays
    /// staged with its buffer intact.
    ///
    /// A failing `set_value` is reported, but the widget already exists:
    /// the item stays committed and the buffered value is dropped. Apply it
    /// again with [`Item::set`].
    pub fn commit_setup(&mut self, toolkit: &mut dyn Toolkit) -> PixleResult<()> {
        profile_function!();
        let Lifecycle::Staged(staged) = &self.lifecycle else {
            return Err(PixleError::Lifecycle {
                id: self.id,
                reason: "missing staged configuration (commit_setup already ran)",
            });
        };

        let mut options = staged.clone();
        let value = options.shift_remove(VALUE_SLOT);
        self.kind.create(toolkit, self.id, &options)?;
        self.lifecycle = Lifecycle::Committed;
        tracing::debug!("Committed {} item {}", self.kind.name, self.id);

        if let Some(value) = value.filter(|v| !v.is_none()) {
            if let Err(err) = toolkit.set_value(self.id, value) {
                tracing::warn!("Initial value of item {} was not applied: {}", self.id, err);
                return Err(err.into());
            }
        }
        Ok(())
    }

    /// `id` plus the live (or staged) options restricted to declared keys.
    pub fn configuration(&self, toolkit: &dyn Toolkit) -> PixleResult<Options> {
        let source = match &self.lifecycle {
            Lifecycle::Committed => self.live_view(toolkit)?,
            Lifecycle::Staged(staged) => staged.clone(),
        };

        let mut config = Options::with_capacity(source.len() + 1);
        config.insert("id".to_string(), Value::Id(self.id));
        for (key, value) in source {
            if self.kind.declares(&key) {
                config.insert(key, value);
            }
        }
        Ok(config)
    }

    /// A single entry of [`Item::configuration`].
    pub fn configuration_option(&self, toolkit: &dyn Toolkit, option: &str) -> PixleResult<Value> {
        let mut config = self.configuration(toolkit)?;
        config
            .swap_remove(option)
            .or_else(|| value_alias(option).and_then(|alias| config.swap_remove(alias)))
            .ok_or_else(|| self.missing(option))
    }

    /// Textual form: `Kind(id=.., label="..", ...)`.
    pub fn describe(&self, toolkit: &dyn Toolkit) -> PixleResult<String> {
        let config = self.configuration(toolkit)?;
        let mut out = format!("{}(", self.kind.name);
        for (i, (key, value)) in config.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", key, value);
        }
        out.push(')');
        Ok(out)
    }

    /// The toolkit configuration merged with the live parent, position and
    /// value.
    fn live_view(&self, toolkit: &dyn Toolkit) -> PixleResult<Options> {
        profile_function!();
        let mut view = toolkit.get_configuration(self.id)?;
        view.insert("parent".to_string(), Value::from(toolkit.get_info(self.id)?.parent));
        view.insert("pos".to_string(), Value::from(toolkit.get_state(self.id)?.pos));
        view.insert("value".to_string(), toolkit.get_value(self.id)?);
        Ok(view)
    }

    fn missing(&self, key: &str) -> PixleError {
        PixleError::MissingOption {
            id: self.id,
            key: key.to_string(),
        }
    }
}

fn set_live_parent(toolkit: &mut dyn Toolkit, id: ItemId, value: &Value) -> PixleResult<()> {
    let Some(parent) = id_value("parent", value)? else {
        tracing::trace!("Ignoring falsy parent for item {}", id);
        return Ok(());
    };
    if toolkit.get_info(id)?.parent == Some(parent) {
        return Ok(());
    }
    tracing::debug!("Moving item {} under {}", id, parent);
    Ok(toolkit.move_item(id, parent)?)
}

impl From<&Item> for ItemId {
    fn from(item: &Item) -> Self {
        item.id
    }
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("kind", &self.kind.name)
            .field("initialized", &self.is_initialized())
            .field("tracked", &self.tracked)
            .field("explicit_pos", &self.explicit_pos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{BUTTON, CHECKBOX, TEXT};
    use crate::testing::IdOnly;

    fn stage(kind: &'static ItemKind, options: ItemOptions) -> Item {
        Item::stage(kind, options, &mut IdOnly(100), DefaultLabel::KindName, true).unwrap()
    }

    #[test]
    fn test_label_defaults_to_kind_name() {
        let item = stage(&BUTTON, ItemOptions::new());
        let staged = item.staged_configuration().unwrap();
        assert_eq!(staged.get("label"), Some(&Value::from("Button")));
        assert!(!item.is_initialized());
    }

    #[test]
    fn test_empty_label_is_kept() {
        let item = stage(&BUTTON, ItemOptions::new().label(""));
        assert_eq!(item.get(&IdOnly(0), "label").unwrap(), Value::from(""));
    }

    #[test]
    fn test_null_label_gets_default() {
        let item = stage(&BUTTON, ItemOptions::new().with("label", Value::None));
        assert_eq!(item.get(&IdOnly(0), "label").unwrap(), Value::from("Button"));
    }

    #[test]
    fn test_generated_and_explicit_ids() {
        assert_eq!(stage(&BUTTON, ItemOptions::new()).id(), ItemId::from_raw(101));
        assert_eq!(
            stage(&BUTTON, ItemOptions::new().with("id", 5)).id(),
            ItemId::from_raw(5)
        );
        assert_eq!(
            stage(&BUTTON, ItemOptions::new().id(9u64).with("id", 5)).id(),
            ItemId::from_raw(9)
        );
    }

    #[test]
    fn test_falsy_parent_is_dropped() {
        let item = stage(&BUTTON, ItemOptions::new().with("parent", 0));
        assert!(!item.staged_configuration().unwrap().contains_key("parent"));

        let item = stage(&BUTTON, ItemOptions::new().parent(12u64));
        assert_eq!(
            item.get(&IdOnly(0), "parent").unwrap(),
            Value::Id(ItemId::from_raw(12))
        );
    }

    #[test]
    fn test_value_and_default_value_share_a_slot() {
        let mut toolkit = IdOnly(0);
        let mut item = stage(&CHECKBOX, ItemOptions::new().with("value", true));
        assert_eq!(item.get(&toolkit, "default_value").unwrap(), Value::Bool(true));

        item.set(&mut toolkit, "default_value", Value::Bool(false)).unwrap();
        assert_eq!(item.get(&toolkit, "value").unwrap(), Value::Bool(false));
        assert!(!item.staged_configuration().unwrap().contains_key("value"));
    }

    #[test]
    fn test_undeclared_constructor_options_are_staged() {
        let mut toolkit = IdOnly(0);
        let mut item = stage(&TEXT, ItemOptions::new().with("tag", "title"));
        item.set(&mut toolkit, "tag", Value::from("subtitle")).unwrap();

        let staged = item.staged_configuration().unwrap();
        assert_eq!(staged.get("tag"), Some(&Value::from("subtitle")));
        assert!(item.attributes().is_empty());
        assert!(!item.configuration(&toolkit).unwrap().contains_key("tag"));
    }

    #[test]
    fn test_undeclared_keys_set_later_go_to_attributes() {
        let mut toolkit = IdOnly(0);
        let mut item = stage(&TEXT, ItemOptions::new());
        item.set(&mut toolkit, "owner", Value::from("menu")).unwrap();

        assert_eq!(item.attributes().get("owner"), Some(&Value::from("menu")));
        assert_eq!(item.get(&toolkit, "owner").unwrap(), Value::from("menu"));
        assert!(!item.staged_configuration().unwrap().contains_key("owner"));
    }

    #[test]
    fn test_explicit_position_is_tracked() {
        let mut toolkit = IdOnly(0);
        assert!(!stage(&BUTTON, ItemOptions::new()).has_explicit_position());
        assert!(!stage(&BUTTON, ItemOptions::new().with("pos", Value::None)).has_explicit_position());

        let mut item = stage(&BUTTON, ItemOptions::new().with("pos", [4.0f32, 8.0]));
        assert!(item.has_explicit_position());
        item.set(&mut toolkit, "pos", Value::None).unwrap();
        assert!(!item.has_explicit_position());
    }

    #[test]
    fn test_missing_staged_option() {
        let item = stage(&BUTTON, ItemOptions::new());
        let err = item.get(&IdOnly(0), "width").unwrap_err();
        assert_eq!(
            err,
            PixleError::MissingOption {
                id: item.id(),
                key: "width".into()
            }
        );
    }

    #[test]
    fn test_id_is_read_only() {
        let mut item = stage(&BUTTON, ItemOptions::new());
        let err = item.set(&mut IdOnly(0), "id", Value::from(3)).unwrap_err();
        assert_eq!(err, PixleError::ReadOnly { key: "id".into() });
        assert_eq!(item.get(&IdOnly(0), "id").unwrap(), Value::Id(item.id()));
    }

    #[test]
    fn test_invalid_parent_value() {
        let mut item = stage(&BUTTON, ItemOptions::new());
        let err = item
            .set(&mut IdOnly(0), "parent", Value::from("window"))
            .unwrap_err();
        assert!(matches!(err, PixleError::InvalidValue { .. }));
    }

    #[test]
    fn test_staged_configuration_filters_declared_keys() {
        let item = stage(
            &BUTTON,
            ItemOptions::new().with("width", 40).with("tooltip", "hi"),
        );
        let config = item.configuration(&IdOnly(0)).unwrap();
        let keys: Vec<_> = config.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "width", "label"]);
        assert_eq!(
            item.configuration_option(&IdOnly(0), "label").unwrap(),
            Value::from("Button")
        );
    }

    #[test]
    fn test_describe_staged() {
        let item = stage(&BUTTON, ItemOptions::new().id(4u64).with("small", true));
        assert_eq!(
            item.describe(&IdOnly(0)).unwrap(),
            "Button(id=4, small=true, label=\"Button\")"
        );
    }
}
