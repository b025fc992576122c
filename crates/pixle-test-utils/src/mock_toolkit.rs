//! Mock implementation of Toolkit for testing.
//!
//! Keeps an in-memory widget tree with per-slot child lists and records
//! every call, so tests can assert both on the resulting tree and on the
//! exact toolkit traffic an operation caused.

use parking_lot::Mutex;
use pixle::{
    ItemId, ItemInfo, ItemState, Options, SLOT_COUNT, Slot, Toolkit, ToolkitError, ToolkitResult,
    Value,
};
use pixle_core::alloc::HashSet;
use std::collections::BTreeMap;

/// First id handed out by [`MockToolkit::generate_id`].
pub const FIRST_GENERATED_ID: u64 = 1000;

/// Records a toolkit call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitCall {
    GenerateId,
    CreateWidget {
        command: String,
        id: ItemId,
        options: Options,
    },
    Configure {
        id: ItemId,
        options: Options,
    },
    GetConfiguration(ItemId),
    GetInfo(ItemId),
    GetState(ItemId),
    GetValue(ItemId),
    SetValue {
        id: ItemId,
        value: Value,
    },
    MoveItem {
        id: ItemId,
        parent: ItemId,
    },
    DeleteItem(ItemId),
}

#[derive(Debug, Clone)]
struct MockWidget {
    command: String,
    slot: Slot,
    configuration: Options,
    parent: Option<ItemId>,
    children: [Vec<ItemId>; SLOT_COUNT],
    value: Value,
    pos: Option<[f32; 2]>,
}

/// Slot a widget created by `command` lands in under its parent.
pub fn slot_for_command(command: &str) -> Slot {
    if command.starts_with("add_item_") && command.ends_with("_handler") {
        Slot::Handlers
    } else if command.starts_with("add_draw_") || command == "draw_layer" {
        Slot::Drawing
    } else if matches!(
        command,
        "add_table_column" | "add_node_link" | "add_file_extension" | "add_plot_legend"
    ) {
        Slot::Special
    } else {
        Slot::Common
    }
}

fn pos_from(value: &Value) -> Option<[f32; 2]> {
    match value {
        Value::List(items) if items.len() == 2 => {
            Some([items[0].as_f64()? as f32, items[1].as_f64()? as f32])
        }
        _ => None,
    }
}

/// Mock implementation of Toolkit for testing.
///
/// # Interior Mutability
///
/// Query methods take `&self` but still record the call, so the call log
/// lives behind a `parking_lot::Mutex`. Widgets use a `BTreeMap` so
/// iteration order is deterministic.
///
/// Deleting a widget removes its whole subtree, like a real toolkit does;
/// later calls for any removed id fail with [`ToolkitError::NotFound`].
pub struct MockToolkit {
    calls: Mutex<Vec<ToolkitCall>>,
    widgets: BTreeMap<ItemId, MockWidget>,
    rejected_commands: HashSet<String>,
    reject_values: bool,
    next_id: u64,
}

impl MockToolkit {
    /// Create an empty mock toolkit.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            widgets: BTreeMap::new(),
            rejected_commands: HashSet::default(),
            reject_values: false,
            next_id: FIRST_GENERATED_ID,
        }
    }

    fn record(&self, call: ToolkitCall) {
        self.calls.lock().push(call);
    }

    fn widget(&self, id: ItemId) -> ToolkitResult<&MockWidget> {
        self.widgets.get(&id).ok_or(ToolkitError::NotFound(id))
    }

    fn widget_mut(&mut self, id: ItemId) -> ToolkitResult<&mut MockWidget> {
        self.widgets.get_mut(&id).ok_or(ToolkitError::NotFound(id))
    }

    fn attach(&mut self, id: ItemId, parent: ItemId, slot: Slot) -> ToolkitResult<()> {
        let parent_widget = self.widgets.get_mut(&parent).ok_or(ToolkitError::Failed {
            id,
            message: format!("parent {} does not exist", parent),
        })?;
        parent_widget.children[slot.index()].push(id);
        Ok(())
    }

    fn detach(&mut self, id: ItemId, parent: ItemId) {
        if let Some(parent_widget) = self.widgets.get_mut(&parent) {
            for slot in parent_widget.children.iter_mut() {
                slot.retain(|child| *child != id);
            }
        }
    }

    fn remove_subtree(&mut self, id: ItemId) {
        if let Some(widget) = self.widgets.remove(&id) {
            for child in widget.children.into_iter().flatten() {
                self.remove_subtree(child);
            }
        }
    }

    /// Make every later `create_widget` call for `command` fail.
    pub fn reject_command(&mut self, command: &str) {
        self.rejected_commands.insert(command.to_string());
    }

    /// Make every later `set_value` call fail.
    pub fn reject_set_value(&mut self) {
        self.reject_values = true;
    }

    /// Whether a widget with this id currently exists.
    pub fn exists(&self, id: ItemId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Creation command used for `id`, if it exists.
    pub fn command_of(&self, id: ItemId) -> Option<String> {
        self.widgets.get(&id).map(|w| w.command.clone())
    }

    /// Set the screen position the toolkit reports, as layout would.
    pub fn place(&mut self, id: ItemId, pos: [f32; 2]) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.pos = Some(pos);
        }
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<ToolkitCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Count recorded calls matching a predicate.
    pub fn count_calls(&self, predicate: impl Fn(&ToolkitCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    pub fn count_creates(&self) -> usize {
        self.count_calls(|call| matches!(call, ToolkitCall::CreateWidget { .. }))
    }

    pub fn count_moves(&self) -> usize {
        self.count_calls(|call| matches!(call, ToolkitCall::MoveItem { .. }))
    }

    pub fn count_configures(&self) -> usize {
        self.count_calls(|call| matches!(call, ToolkitCall::Configure { .. }))
    }

    pub fn count_set_values(&self) -> usize {
        self.count_calls(|call| matches!(call, ToolkitCall::SetValue { .. }))
    }

    pub fn count_deletes(&self) -> usize {
        self.count_calls(|call| matches!(call, ToolkitCall::DeleteItem(_)))
    }
}

impl Default for MockToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for MockToolkit {
    fn generate_id(&mut self) -> ItemId {
        self.record(ToolkitCall::GenerateId);
        let id = ItemId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    fn create_widget(&mut self, command: &str, id: ItemId, options: &Options) -> ToolkitResult<()> {
        self.record(ToolkitCall::CreateWidget {
            command: command.to_string(),
            id,
            options: options.clone(),
        });

        if self.rejected_commands.contains(command) {
            return Err(ToolkitError::Failed {
                id,
                message: format!("{} rejected", command),
            });
        }
        if self.widgets.contains_key(&id) {
            return Err(ToolkitError::Failed {
                id,
                message: "id already in use".to_string(),
            });
        }

        let slot = slot_for_command(command);
        let mut configuration = options.clone();
        let parent = configuration
            .shift_remove("parent")
            .and_then(|value| value.as_item_id().flatten());
        let pos = configuration.shift_remove("pos").as_ref().and_then(pos_from);
        let value = configuration.shift_remove("default_value").unwrap_or_default();

        if let Some(parent) = parent {
            self.attach(id, parent, slot)?;
        }

        self.widgets.insert(
            id,
            MockWidget {
                command: command.to_string(),
                slot,
                configuration,
                parent,
                children: Default::default(),
                value,
                pos,
            },
        );
        Ok(())
    }

    fn configure(&mut self, id: ItemId, options: &Options) -> ToolkitResult<()> {
        self.record(ToolkitCall::Configure {
            id,
            options: options.clone(),
        });

        let widget = self.widget_mut(id)?;
        for (key, value) in options {
            if key == "pos" {
                widget.pos = pos_from(value);
            } else {
                widget.configuration.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    fn get_configuration(&self, id: ItemId) -> ToolkitResult<Options> {
        self.record(ToolkitCall::GetConfiguration(id));
        Ok(self.widget(id)?.configuration.clone())
    }

    fn get_info(&self, id: ItemId) -> ToolkitResult<ItemInfo> {
        self.record(ToolkitCall::GetInfo(id));
        let widget = self.widget(id)?;
        Ok(ItemInfo {
            parent: widget.parent,
            children: widget.children.clone(),
        })
    }

    fn get_state(&self, id: ItemId) -> ToolkitResult<ItemState> {
        self.record(ToolkitCall::GetState(id));
        let widget = self.widget(id)?;
        Ok(ItemState {
            pos: widget.pos,
            visible: widget
                .configuration
                .get("show")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            hovered: false,
            active: false,
        })
    }

    fn get_value(&self, id: ItemId) -> ToolkitResult<Value> {
        self.record(ToolkitCall::GetValue(id));
        Ok(self.widget(id)?.value.clone())
    }

    fn set_value(&mut self, id: ItemId, value: Value) -> ToolkitResult<()> {
        self.record(ToolkitCall::SetValue {
            id,
            value: value.clone(),
        });

        if self.reject_values {
            return Err(ToolkitError::Failed {
                id,
                message: "set_value rejected".to_string(),
            });
        }
        self.widget_mut(id)?.value = value;
        Ok(())
    }

    fn move_item(&mut self, id: ItemId, parent: ItemId) -> ToolkitResult<()> {
        self.record(ToolkitCall::MoveItem { id, parent });

        let widget = self.widget(id)?;
        let (old_parent, slot) = (widget.parent, widget.slot);
        if !self.widgets.contains_key(&parent) {
            return Err(ToolkitError::NotFound(parent));
        }
        if let Some(old_parent) = old_parent {
            self.detach(id, old_parent);
        }
        self.attach(id, parent, slot)?;
        self.widget_mut(id)?.parent = Some(parent);
        Ok(())
    }

    fn delete_item(&mut self, id: ItemId) -> ToolkitResult<()> {
        self.record(ToolkitCall::DeleteItem(id));

        let parent = self.widget(id)?.parent;
        if let Some(parent) = parent {
            self.detach(id, parent);
        }
        self.remove_subtree(id);
        Ok(())
    }
}
