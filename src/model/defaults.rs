use super::checklist::{Category, Checklist, Item};
use crate::ops::id::IdSource;

/// Built-in family camping checklist: `(category, [(item, optional)])`
pub const DEFAULT_DATASET: &[(&str, &[(&str, bool)])] = &[
    (
        "Campsite Gear",
        &[
            ("Tent, poles, stakes", false),
            ("Tent footprint (ground cover for under your tent)", false),
            ("Extra tarp or canopy", true),
            ("Sleeping bag for each camper", false),
            ("Sleeping pad for each camper", false),
            ("Repair kit for pads, mattress, tent, tarp", false),
            ("Pillows", false),
            ("Extra blankets", true),
            ("Chairs", false),
            ("Headlamps or flashlights (extra batteries)", false),
            ("Lantern", false),
            ("Lantern fuel or batteries", true),
        ],
    ),
    (
        "Kitchen",
        &[
            ("Stove", false),
            ("Fuel for stove", false),
            ("Matches or lighter", false),
            ("Firewood", false),
            ("Frying pan", false),
            ("Pot", false),
            ("French press or portable coffee maker", true),
            ("Corkscrew", true),
            ("Tablecloth", true),
            ("Roasting sticks for marshmallows, hot dogs", true),
            ("Food\u{2011}storage containers, bags", false),
            ("Trash bags", false),
            ("Cooler", false),
            ("Ice", true),
            ("Water bottles", false),
            ("Plates, bowls, forks, spoons, knives", false),
            ("Cups, mugs", true),
            ("Paring knife, spatula, cooking spoon", false),
            ("Cutting board", false),
            ("Foil", false),
            ("Biodegradable soap", true),
            ("Sponge, dishcloth, dishtowel", true),
            ("Paper towels", true),
            ("Extra bin for washing dishes", true),
        ],
    ),
    (
        "Clothes",
        &[
            ("Clothes for daytime", false),
            ("Sleepwear", false),
            ("Swimsuits", true),
            ("Rainwear", false),
            (
                "Shoes: hiking/walking shoes, easy\u{2011}on shoes, water shoes",
                false,
            ),
            ("Extra layers for warmth", false),
            ("Gloves", true),
            ("Hats", true),
        ],
    ),
    (
        "Personal Items",
        &[
            ("Sunscreen", false),
            ("Insect repellant", false),
            ("First\u{2011}aid kit", false),
            ("Prescription medications", false),
            ("Toothbrush, toiletries", false),
            ("Soap", false),
            ("60% or higher alcohol\u{2011}based hand sanitizer", false),
            ("Toilet paper", false),
        ],
    ),
    (
        "Other Items",
        &[
            ("Camera", true),
            ("Campsite reservation confirmation, phone number", false),
            ("Maps, area information", false),
            ("Bikes toys", true),
            ("Toys", true),
            ("Pet supplies and food", true),
            ("Disinfectant spray and wipes", true),
            ("String or clothesline", true),
        ],
    ),
];

/// Build an independent copy of the default dataset with fresh ids.
///
/// Every call allocates a new tree, so mutating the result never affects
/// later copies.
pub fn default_checklist(ids: &mut dyn IdSource) -> Checklist {
    let categories = DEFAULT_DATASET
        .iter()
        .map(|(name, items)| {
            let mut category = Category::new(ids.next_id(), (*name).to_string());
            category.items = items
                .iter()
                .map(|(item_name, optional)| {
                    let mut item = Item::new(ids.next_id(), (*item_name).to_string());
                    item.optional = *optional;
                    item
                })
                .collect();
            category
        })
        .collect();
    Checklist {
        categories,
        show_optional: true,
    }
}

/// Names of the default categories, in dataset order
pub fn default_category_names() -> impl Iterator<Item = &'static str> {
    DEFAULT_DATASET.iter().map(|(name, _)| *name)
}

/// Whether a category is protected from deletion.
///
/// Protection is by name: any category whose name equals a default category
/// name is protected, including user-added categories that reuse the name.
pub fn is_protected(category: &Category) -> bool {
    default_category_names().any(|name| name == category.name)
}
