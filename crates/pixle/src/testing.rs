//! Unit-test helpers.

use crate::error::ToolkitResult;
use crate::id::ItemId;
use crate::toolkit::{ItemInfo, ItemState, Toolkit};
use crate::value::{Options, Value};

/// Toolkit that only hands out ids; staging never touches anything else.
pub(crate) struct IdOnly(pub u64);

impl Toolkit for IdOnly {
    fn generate_id(&mut self) -> ItemId {
        self.0 += 1;
        ItemId::from_raw(self.0)
    }
    fn create_widget(&mut self, _: &str, _: ItemId, _: &Options) -> ToolkitResult<()> {
        unreachable!()
    }
    fn configure(&mut self, _: ItemId, _: &Options) -> ToolkitResult<()> {
        unreachable!()
    }
    fn get_configuration(&self, _: ItemId) -> ToolkitResult<Options> {
        unreachable!()
    }
    fn get_info(&self, _: ItemId) -> ToolkitResult<ItemInfo> {
        unreachable!()
    }
    fn get_state(&self, _: ItemId) -> ToolkitResult<ItemState> {
        unreachable!()
    }
    fn get_value(&self, _: ItemId) -> ToolkitResult<Value> {
        unreachable!()
    }
    fn set_value(&mut self, _: ItemId, _: Value) -> ToolkitResult<()> {
        unreachable!()
    }
    fn move_item(&mut self, _: ItemId, _: ItemId) -> ToolkitResult<()> {
        unreachable!()
    }
    fn delete_item(&mut self, _: ItemId) -> ToolkitResult<()> {
        unreachable!()
    }
}
