use std::collections::HashSet;

use crate::model::checklist::Checklist;

/// Error type for snapshot parsing
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate category id: {0}")]
    DuplicateCategory(String),
    #[error("duplicate item id {item} in category {category}")]
    DuplicateItem { category: String, item: String },
}

/// Parse a snapshot (`{"categories": [...], "showOptional": bool}`).
///
/// Serde enforces the required fields (`categories`, and `id`/`name` on every
/// category and item) and fills in the optional ones. Ids must be unique
/// among categories and among the items of each category.
pub fn parse_snapshot(text: &str) -> Result<Checklist, SnapshotError> {
    let checklist: Checklist = serde_json::from_str(text)?;
    check_ids(&checklist)?;
    Ok(checklist)
}

/// Serialize to the compact JSON snapshot form
pub fn serialize_snapshot(checklist: &Checklist) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(checklist)?)
}

fn check_ids(checklist: &Checklist) -> Result<(), SnapshotError> {
    let mut categories = HashSet::new();
    for category in &checklist.categories {
        if !categories.insert(category.id.as_str()) {
            return Err(SnapshotError::DuplicateCategory(category.id.clone()));
        }
        let mut items = HashSet::new();
        for item in &category.items {
            if !items.insert(item.id.as_str()) {
                return Err(SnapshotError::DuplicateItem {
                    category: category.id.clone(),
                    item: item.id.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::checklist::{Category, Item};
    use insta::assert_snapshot;

    #[test]
    fn serialized_form_is_compact_and_ordered() {
        let mut gear = Category::new("c1".into(), "Gear".into());
        gear.items.push(Item::new("i1".into(), "Rope".into()));
        let list = Checklist {
            categories: vec![gear],
            show_optional: true,
        };
        assert_snapshot!(
            serialize_snapshot(&list).unwrap(),
            @r#"{"categories":[{"id":"c1","name":"Gear","items":[{"id":"i1","name":"Rope","checked":false,"optional":false}]}],"showOptional":true}"#
        );
    }

    #[test]
    fn missing_show_optional_defaults_true() {
        let list = parse_snapshot(r#"{"categories":[]}"#).unwrap();
        assert!(list.show_optional);
        assert!(list.categories.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let list = parse_snapshot(
            r#"{"categories":[{"id":"a","name":"A","color":"red","items":[]}],"showOptional":false,"v":2}"#,
        )
        .unwrap();
        assert_eq!(list.categories[0].name, "A");
        assert!(!list.show_optional);
    }

    #[test]
    fn shape_errors() {
        for bad in [
            "",
            "not json {{{",
            "[]",
            "null",
            r#"{"showOptional":true}"#,
            r#"{"categories":[{"name":"A","items":[]}]}"#,
            r#"{"categories":[{"id":"a","items":[]}]}"#,
            r#"{"categories":[{"id":"a","name":"A","items":[{"id":"x"}]}]}"#,
            r#"{"categories":[{"id":"a","name":"A","items":{}}]}"#,
            r#"{"categories":[],"showOptional":"yes"}"#,
        ] {
            assert!(parse_snapshot(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn duplicate_ids_rejected() {
        let dup_cat = r#"{"categories":[{"id":"a","name":"A"},{"id":"a","name":"B"}]}"#;
        assert!(matches!(
            parse_snapshot(dup_cat),
            Err(SnapshotError::DuplicateCategory(id)) if id == "a"
        ));

        let dup_item = r#"{"categories":[{"id":"a","name":"A","items":[
            {"id":"x","name":"X"},{"id":"x","name":"Y"}]}]}"#;
        assert!(matches!(
            parse_snapshot(dup_item),
            Err(SnapshotError::DuplicateItem { .. })
        ));

        // Same item id in two categories is allowed
        let across = r#"{"categories":[
            {"id":"a","name":"A","items":[{"id":"x","name":"X"}]},
            {"id":"b","name":"B","items":[{"id":"x","name":"X"}]}]}"#;
        assert!(parse_snapshot(across).is_ok());
    }
}
