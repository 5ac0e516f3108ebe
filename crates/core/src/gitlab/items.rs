//! Projection of issue and merge-request listings

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One issue or merge request, reduced to the fields callers get back.
///
/// Deserialization is the projection: whatever else the upstream attaches to
/// a record (author object, iid, labels, ...) is dropped here, and exactly
/// these five fields are serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecord {
    pub id: u64,
    pub title: String,
    pub created_at: String,
    pub state: String,
    pub web_url: String,
}

/// Aggregated listing result: the summary message plus the projected records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListOutput {
    pub message: String,
    pub items: Vec<ItemRecord>,
}

/// The `created_after`/`created_before` filter bounds covering one calendar
/// year, as literal UTC timestamps.
pub fn year_bounds(year: i32) -> (String, String) {
    (
        format!("{year}-01-01T00:00:00Z"),
        format!("{year}-12-31T23:59:59Z"),
    )
}

/// True when the year renders as exactly four digits.
pub fn has_four_digits(year: i32) -> bool {
    Regex::new(r"^\d{4}$").unwrap().is_match(&year.to_string())
}

/// Build the final listing output from the accumulated records.
pub fn transform_item_list(items: Vec<ItemRecord>, item_type: &str, year: i32) -> ListOutput {
    ListOutput {
        message: format!("Retrieved {} {item_type} from {year}", items.len()),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record(id: u64, title: &str, state: &str) -> ItemRecord {
        ItemRecord {
            id,
            title: title.to_string(),
            created_at: format!("2023-04-0{id}T10:00:00Z"),
            state: state.to_string(),
            web_url: format!("https://gitlab.example.com/group/app/-/issues/{id}"),
        }
    }

    #[test]
    fn test_year_bounds() {
        let (after, before) = year_bounds(2023);
        assert_eq!(after, "2023-01-01T00:00:00Z");
        assert_eq!(before, "2023-12-31T23:59:59Z");
    }

    #[test]
    fn test_has_four_digits() {
        assert!(has_four_digits(2010));
        assert!(has_four_digits(9999));
        assert!(!has_four_digits(999));
        assert!(!has_four_digits(10000));
        assert!(!has_four_digits(-2023));
    }

    #[test]
    fn test_transform_item_list_message() {
        let output = transform_item_list(
            vec![sample_record(1, "Broken login", "opened")],
            "issues",
            2023,
        );
        assert_eq!(output.message, "Retrieved 1 issues from 2023");
        assert_eq!(output.items.len(), 1);
    }

    #[test]
    fn test_transform_empty_list() {
        let output = transform_item_list(vec![], "mr", 2021);
        assert_eq!(output.message, "Retrieved 0 mr from 2021");
        assert!(output.items.is_empty());
    }

    #[test]
    fn test_transform_preserves_fetch_order() {
        let output = transform_item_list(
            vec![
                sample_record(2, "Second", "closed"),
                sample_record(1, "First", "opened"),
            ],
            "issues",
            2023,
        );
        assert_eq!(output.items[0].id, 2);
        assert_eq!(output.items[1].id, 1);
    }

    #[test]
    fn test_deserialization_drops_extra_fields() {
        let records: Vec<ItemRecord> = serde_json::from_value(json!([
            {
                "id": 7,
                "iid": 101,
                "title": "Broken login",
                "created_at": "2023-01-05T10:00:00Z",
                "state": "opened",
                "web_url": "https://gitlab.example.com/group/app/-/issues/101",
                "author": {"id": 9, "username": "dev1"},
                "labels": ["bug"]
            }
        ]))
        .unwrap();

        assert_eq!(records.len(), 1);
        let value = serde_json::to_value(&records[0]).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        for key in ["id", "title", "created_at", "state", "web_url"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn test_deserialization_requires_the_projected_fields() {
        let result: Result<Vec<ItemRecord>, _> =
            serde_json::from_value(json!([{"id": 7, "title": "No state"}]));
        assert!(result.is_err());
    }
}
