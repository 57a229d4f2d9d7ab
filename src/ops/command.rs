use crate::model::checklist::Checklist;
use crate::model::config::LabelConfig;
use crate::ops::checklist_ops::{self, StoreError};
use crate::ops::id::IdSource;
use crate::ops::reorder::{self, ReorderEvent};

/// A discrete user action against the checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetShowOptional(bool),
    AddCategory {
        name: String,
    },
    RenameCategory {
        category: String,
        name: String,
    },
    DeleteCategory {
        category: String,
    },
    AddItem {
        category: String,
        name: String,
    },
    RenameItem {
        category: String,
        item: String,
        name: String,
    },
    SetItemChecked {
        category: String,
        item: String,
        checked: bool,
    },
    ToggleItemOptional {
        category: String,
        item: String,
    },
    DeleteItem {
        category: String,
        item: String,
    },
    Reorder(ReorderEvent),
    ResetToDefault,
}

/// What a successfully applied command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// State changed, nothing to report back
    Done,
    /// A category or item was created with this id
    Created(String),
}

impl Command {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetShowOptional(_) => "set-show-optional",
            Command::AddCategory { .. } => "add-category",
            Command::RenameCategory { .. } => "rename-category",
            Command::DeleteCategory { .. } => "delete-category",
            Command::AddItem { .. } => "add-item",
            Command::RenameItem { .. } => "rename-item",
            Command::SetItemChecked { .. } => "set-item-checked",
            Command::ToggleItemOptional { .. } => "toggle-item-optional",
            Command::DeleteItem { .. } => "delete-item",
            Command::Reorder(ReorderEvent::Categories { .. }) => "reorder-categories",
            Command::Reorder(ReorderEvent::Items { .. }) => "move-item",
            Command::ResetToDefault => "reset",
        }
    }

    /// Apply this command to `checklist`. On `Err` the checklist is unchanged.
    pub fn apply(
        &self,
        checklist: &mut Checklist,
        ids: &mut dyn IdSource,
        labels: &LabelConfig,
    ) -> Result<Applied, StoreError> {
        match self {
            Command::SetShowOptional(show) => {
                checklist_ops::set_show_optional(checklist, *show);
            }
            Command::AddCategory { name } => {
                return checklist_ops::add_category(checklist, ids, name).map(Applied::Created);
            }
            Command::RenameCategory { category, name } => {
                checklist_ops::rename_category(checklist, category, name, labels)?;
            }
            Command::DeleteCategory { category } => {
                checklist_ops::delete_category(checklist, category)?;
            }
            Command::AddItem { category, name } => {
                return checklist_ops::add_item(checklist, ids, category, name)
                    .map(Applied::Created);
            }
            Command::RenameItem {
                category,
                item,
                name,
            } => {
                checklist_ops::rename_item(checklist, category, item, name, labels)?;
            }
            Command::SetItemChecked {
                category,
                item,
                checked,
            } => {
                checklist_ops::set_item_checked(checklist, category, item, *checked)?;
            }
            Command::ToggleItemOptional { category, item } => {
                checklist_ops::toggle_item_optional(checklist, category, item)?;
            }
            Command::DeleteItem { category, item } => {
                checklist_ops::delete_item(checklist, category, item)?;
            }
            Command::Reorder(event) => reorder::apply_reorder(checklist, event)?,
            Command::ResetToDefault => checklist_ops::reset_to_default(checklist, ids),
        }
        Ok(Applied::Done)
    }
}
