use maillist_core::project_row;
use maillist_model::{ColumnMapping, FieldId, RecordData};
use proptest::prelude::*;

#[test]
fn rightmost_column_wins_shared_field() {
    let headers = vec!["Work".to_string(), "Home".to_string()];
    let mut mapping = ColumnMapping::new();
    mapping.insert("Work", FieldId::new("email").unwrap());
    mapping.insert("Home", FieldId::new("email").unwrap());
    let mut row = RecordData::new();
    row.insert("Work".to_string(), "w@x.com".to_string());
    row.insert("Home".to_string(), "h@x.com".to_string());

    let data = project_row(&headers, &row, &mapping);
    assert_eq!(data.len(), 1);
    assert_eq!(data.get("email").map(String::as_str), Some("h@x.com"));
}

proptest! {
    #[test]
    fn projected_keys_are_mapped_targets(
        row in prop::collection::btree_map("[A-D]", "[a-z]{0,3}", 0..4),
        targets in prop::collection::btree_map("[A-D]", "[w-z]", 0..4),
    ) {
        let headers: Vec<String> = ["A", "B", "C", "D"].iter().map(|h| (*h).to_string()).collect();
        let mapping: ColumnMapping = targets
            .iter()
            .map(|(header, field)| (header.clone(), FieldId::new(field.as_str()).unwrap()))
            .collect();

        let data = project_row(&headers, &row, &mapping);
        for (key, value) in &data {
            prop_assert!(targets.values().any(|t| t == key));
            prop_assert!(
                headers
                    .iter()
                    .any(|h| targets.get(h) == Some(key) && row.get(h) == Some(value))
            );
        }
        for (header, field) in &targets {
            if row.contains_key(header) {
                prop_assert!(data.contains_key(field));
            }
        }
    }
}
