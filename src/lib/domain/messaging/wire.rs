//! Conversions between associative maps and Mandrill's name-content form.
//!
//! Wherever the API expects a list instead of a map (global merge vars,
//! per-recipient merge vars, template content regions), each key/value pair
//! travels as a `{name, content}` record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single key/value pair in Mandrill's name-content form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameContent {
    /// The entry's name.
    pub name: String,

    /// The entry's content.
    pub content: Value,
}

/// Convert an associative map into a name-content record list.
///
/// One record per entry, in the map's iteration order.
pub fn to_name_content(map: &IndexMap<String, Value>) -> Vec<NameContent> {
    map.iter()
        .map(|(name, content)| NameContent {
            name: name.clone(),
            content: content.clone(),
        })
        .collect()
}

/// Convert a name-content record list back into an associative map.
///
/// Inverse of [`to_name_content`]; records with a duplicate name overwrite
/// earlier ones.
pub fn from_name_content(records: &[NameContent]) -> IndexMap<String, Value> {
    records
        .iter()
        .map(|record| (record.name.clone(), record.content.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_map() -> IndexMap<String, Value> {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), json!(1));
        map.insert("b".to_string(), json!("two"));
        map.insert("c".to_string(), json!({"nested": true}));
        map
    }

    #[test]
    fn test_to_name_content_preserves_order() {
        let records = to_name_content(&sample_map());

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[0].content, json!(1));
        assert_eq!(records[1].name, "b");
        assert_eq!(records[2].name, "c");
    }

    #[test]
    fn test_round_trip_for_unique_keys() {
        let map = sample_map();

        assert_eq!(from_name_content(&to_name_content(&map)), map);
    }

    #[test]
    fn test_from_name_content_later_duplicate_wins() {
        let records = vec![
            NameContent {
                name: "a".to_string(),
                content: json!(1),
            },
            NameContent {
                name: "a".to_string(),
                content: json!(2),
            },
        ];

        let map = from_name_content(&records);

        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], json!(2));
    }

    #[test]
    fn test_record_wire_shape() {
        let record = NameContent {
            name: "greeting".to_string(),
            content: json!("hello"),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "greeting", "content": "hello"})
        );
    }
}
