//! The structured result shape every operation resolves to
//!
//! Nothing escapes an operation as a raised error: callers always receive an
//! `Outcome`, tagged with a `status` discriminator on the wire. Validation
//! failures carry a list of messages; every other failure carries a single
//! message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminated operation result, serialized with a `status` tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success {
        message: String,
        data: Value,
    },
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        errors: Option<Vec<String>>,
    },
}

impl Outcome {
    /// A successful outcome with a summary message and payload.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Outcome::Success {
            message: message.into(),
            data,
        }
    }

    /// A failed outcome carrying a single message.
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Error {
            message: Some(message.into()),
            errors: None,
        }
    }

    /// A failed outcome carrying the validator's message list.
    pub fn invalid(errors: Vec<String>) -> Self {
        Outcome::Error {
            message: None,
            errors: Some(errors),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let outcome = Outcome::success("Retrieved 2 issues from 2023", json!([1, 2]));
        assert!(outcome.is_success());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "status": "success",
                "message": "Retrieved 2 issues from 2023",
                "data": [1, 2]
            })
        );
    }

    #[test]
    fn test_failure_shape_has_no_errors_field() {
        let outcome = Outcome::failure("Target 'backend' not found");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "error", "message": "Target 'backend' not found"})
        );
    }

    #[test]
    fn test_invalid_shape_has_no_message_field() {
        let outcome = Outcome::invalid(vec!["Username cannot be empty".to_string()]);
        assert!(!outcome.is_success());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "error", "errors": ["Username cannot be empty"]})
        );
    }

    #[test]
    fn test_round_trip() {
        let outcome = Outcome::success("ok", json!({"id": 1}));
        let text = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&text).unwrap();
        assert_eq!(back, outcome);
    }
}
