use serde::{Deserialize, Serialize};

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier, unique within its category
    pub id: String,
    /// Display text (never empty after an edit)
    pub name: String,
    /// Completion state
    #[serde(default)]
    pub checked: bool,
    /// Hidden when the global show-optional flag is off
    #[serde(default)]
    pub optional: bool,
}

impl Item {
    /// Create a new unchecked, required item
    pub fn new(id: String, name: String) -> Self {
        Item {
            id,
            name,
            checked: false,
            optional: false,
        }
    }
}

/// A named, ordered group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Items in display order
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    /// Create a new empty category
    pub fn new(id: String, name: String) -> Self {
        Category {
            id,
            name,
            items: Vec::new(),
        }
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Items shown under the given global flag
    pub fn visible_items(&self, show_optional: bool) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |i| show_optional || !i.optional)
    }
}

/// The root state: ordered categories plus the global display flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Categories in display order
    pub categories: Vec<Category>,
    /// Whether optional items are shown. Defaults to true when absent.
    #[serde(default = "default_true")]
    pub show_optional: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Checklist {
    fn default() -> Self {
        Checklist {
            categories: Vec::new(),
            show_optional: true,
        }
    }
}

/// Checked vs. total item counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
}

impl Checklist {
    pub fn find_category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn find_category_mut(&mut self, category_id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == category_id)
    }

    /// Position of a category in display order
    pub fn category_index(&self, category_id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == category_id)
    }

    pub fn find_item(&self, category_id: &str, item_id: &str) -> Option<&Item> {
        self.find_category(category_id)?.find_item(item_id)
    }

    /// Total number of items across every category
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        for item in self.categories.iter().flat_map(|c| &c.items) {
            progress.total += 1;
            if item.checked {
                progress.checked += 1;
            }
        }
        progress
    }
}
