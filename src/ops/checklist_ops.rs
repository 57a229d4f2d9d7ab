use crate::model::checklist::{Category, Checklist, Item};
use crate::model::config::LabelConfig;
use crate::model::defaults::{default_checklist, is_protected};
use crate::ops::id::IdSource;
use crate::util::text::{name_or_placeholder, non_blank};

/// Error type for checklist operations.
///
/// Every operation returning `Err` leaves the checklist untouched, so callers
/// may treat an error as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("category not found: {0}")]
    CategoryNotFound(String),
    #[error("item {item} not found in category {category}")]
    ItemNotFound { category: String, item: String },
    #[error("name is empty")]
    EmptyName,
    #[error("category {0:?} belongs to the default checklist and cannot be deleted")]
    ProtectedCategory(String),
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("category {category} already has an item with id {item}")]
    DuplicateItem { category: String, item: String },
}

// ---------------------------------------------------------------------------
// Global flag
// ---------------------------------------------------------------------------

pub fn set_show_optional(checklist: &mut Checklist, show: bool) {
    checklist.show_optional = show;
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Append a new empty category. Returns its id.
pub fn add_category(
    checklist: &mut Checklist,
    ids: &mut dyn IdSource,
    name: &str,
) -> Result<String, StoreError> {
    let name = non_blank(name).ok_or(StoreError::EmptyName)?;
    let id = unused_id(ids, |id| checklist.find_category(id).is_some());
    checklist.categories.push(Category::new(id.clone(), name));
    Ok(id)
}

/// Rename a category; a blank name becomes the placeholder label
pub fn rename_category(
    checklist: &mut Checklist,
    category_id: &str,
    new_name: &str,
    labels: &LabelConfig,
) -> Result<(), StoreError> {
    let category = category_mut(checklist, category_id)?;
    category.name = name_or_placeholder(new_name, &labels.untitled_category);
    Ok(())
}

/// Delete a category unless its name matches a default category.
/// Returns the removed category.
pub fn delete_category(
    checklist: &mut Checklist,
    category_id: &str,
) -> Result<Category, StoreError> {
    let idx = checklist
        .category_index(category_id)
        .ok_or_else(|| StoreError::CategoryNotFound(category_id.to_string()))?;
    if is_protected(&checklist.categories[idx]) {
        return Err(StoreError::ProtectedCategory(
            checklist.categories[idx].name.clone(),
        ));
    }
    Ok(checklist.categories.remove(idx))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Append a new unchecked, required item to a category. Returns its id.
pub fn add_item(
    checklist: &mut Checklist,
    ids: &mut dyn IdSource,
    category_id: &str,
    name: &str,
) -> Result<String, StoreError> {
    let name = non_blank(name).ok_or(StoreError::EmptyName)?;
    let category = category_mut(checklist, category_id)?;
    let id = unused_id(ids, |id| category.find_item(id).is_some());
    category.items.push(Item::new(id.clone(), name));
    Ok(id)
}

pub fn rename_item(
    checklist: &mut Checklist,
    category_id: &str,
    item_id: &str,
    new_name: &str,
    labels: &LabelConfig,
) -> Result<(), StoreError> {
    let item = item_mut(checklist, category_id, item_id)?;
    item.name = name_or_placeholder(new_name, &labels.untitled_item);
    Ok(())
}

pub fn set_item_checked(
    checklist: &mut Checklist,
    category_id: &str,
    item_id: &str,
    checked: bool,
) -> Result<(), StoreError> {
    item_mut(checklist, category_id, item_id)?.checked = checked;
    Ok(())
}

/// Flip an item's optional flag. Returns the new value.
pub fn toggle_item_optional(
    checklist: &mut Checklist,
    category_id: &str,
    item_id: &str,
) -> Result<bool, StoreError> {
    let item = item_mut(checklist, category_id, item_id)?;
    item.optional = !item.optional;
    Ok(item.optional)
}

/// Remove an item from its category. Returns the removed item.
pub fn delete_item(
    checklist: &mut Checklist,
    category_id: &str,
    item_id: &str,
) -> Result<Item, StoreError> {
    let category = category_mut(checklist, category_id)?;
    let idx = category
        .items
        .iter()
        .position(|i| i.id == item_id)
        .ok_or_else(|| StoreError::ItemNotFound {
            category: category_id.to_string(),
            item: item_id.to_string(),
        })?;
    Ok(category.items.remove(idx))
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// Replace the whole checklist with a fresh default copy (new ids everywhere)
pub fn reset_to_default(checklist: &mut Checklist, ids: &mut dyn IdSource) {
    *checklist = default_checklist(ids);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn category_mut<'a>(
    checklist: &'a mut Checklist,
    category_id: &str,
) -> Result<&'a mut Category, StoreError> {
    checklist
        .find_category_mut(category_id)
        .ok_or_else(|| StoreError::CategoryNotFound(category_id.to_string()))
}

/// Draw ids until one is not already taken in the target scope
fn unused_id(ids: &mut dyn IdSource, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.next_id();
        if !taken(&id) {
            return id;
        }
    }
}

fn item_mut<'a>(
    checklist: &'a mut Checklist,
    category_id: &str,
    item_id: &str,
) -> Result<&'a mut Item, StoreError> {
    category_mut(checklist, category_id)?
        .find_item_mut(item_id)
        .ok_or_else(|| StoreError::ItemNotFound {
            category: category_id.to_string(),
            item: item_id.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
