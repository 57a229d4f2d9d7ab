use crate::model::checklist::Checklist;
use crate::ops::checklist_ops::StoreError;

/// Result of a drag gesture, as reported by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderEvent {
    /// A category was dragged within the category list
    Categories { old_index: usize, new_index: usize },
    /// An item was dragged within one item list or across two
    Items {
        from_category: String,
        from_index: usize,
        to_category: String,
        to_index: usize,
    },
}

/// Apply a drag result to the checklist
pub fn apply_reorder(checklist: &mut Checklist, event: &ReorderEvent) -> Result<(), StoreError> {
    match event {
        ReorderEvent::Categories {
            old_index,
            new_index,
        } => reorder_categories(checklist, *old_index, *new_index),
        ReorderEvent::Items {
            from_category,
            from_index,
            to_category,
            to_index,
        } => move_item(checklist, from_category, *from_index, to_category, *to_index),
    }
}

/// Move the category at `old_index` to `new_index` (pop then insert).
///
/// `new_index` is interpreted against the list with the category already
/// removed. Out-of-range indices are rejected without touching the list;
/// nothing is clamped.
pub fn reorder_categories(
    checklist: &mut Checklist,
    old_index: usize,
    new_index: usize,
) -> Result<(), StoreError> {
    move_within(&mut checklist.categories, old_index, new_index)
}

/// Move the item at `from_index` in one category to `to_index` in another
/// (or the same) category.
///
/// Both ends are validated before anything is removed, so a rejected move
/// leaves both categories exactly as they were. Item ids are only unique per
/// category, so a move into a category already holding the same id is
/// rejected.
pub fn move_item(
    checklist: &mut Checklist,
    from_category: &str,
    from_index: usize,
    to_category: &str,
    to_index: usize,
) -> Result<(), StoreError> {
    let from = checklist
        .category_index(from_category)
        .ok_or_else(|| StoreError::CategoryNotFound(from_category.to_string()))?;
    let to = checklist
        .category_index(to_category)
        .ok_or_else(|| StoreError::CategoryNotFound(to_category.to_string()))?;

    if from == to {
        return move_within(&mut checklist.categories[from].items, from_index, to_index);
    }

    let source_len = checklist.categories[from].items.len();
    if from_index >= source_len {
        return Err(StoreError::IndexOutOfRange {
            index: from_index,
            len: source_len,
        });
    }
    let target_len = checklist.categories[to].items.len();
    if to_index > target_len {
        return Err(StoreError::IndexOutOfRange {
            index: to_index,
            len: target_len,
        });
    }

    let moved_id = &checklist.categories[from].items[from_index].id;
    if checklist.categories[to].find_item(moved_id).is_some() {
        return Err(StoreError::DuplicateItem {
            category: to_category.to_string(),
            item: moved_id.clone(),
        });
    }

    let item = checklist.categories[from].items.remove(from_index);
    checklist.categories[to].items.insert(to_index, item);
    Ok(())
}

/// Pop-then-insert within a single vector
fn move_within<T>(list: &mut Vec<T>, old_index: usize, new_index: usize) -> Result<(), StoreError> {
    let len = list.len();
    if old_index >= len {
        return Err(StoreError::IndexOutOfRange {
            index: old_index,
            len,
        });
    }
    // After removal the list has len - 1 elements; inserting at len - 1
    // appends.
    if new_index >= len {
        return Err(StoreError::IndexOutOfRange {
            index: new_index,
            len,
        });
    }
    let moved = list.remove(old_index);
    list.insert(new_index, moved);
    Ok(())
}
