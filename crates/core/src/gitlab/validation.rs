//! Input validation shared by the membership and listing operations
//!
//! One validator serves both call sites: only the fields a caller supplies
//! are checked, and every applicable violation is reported together rather
//! than short-circuiting on the first. The token-presence check always runs
//! and is appended last.

use crate::gitlab::roles::{access_level, role_names};

/// Earliest year the listing operations accept.
pub const EARLIEST_YEAR: i32 = 2010;

/// A sparse set of fields to validate. Unset fields are not checked.
///
/// `year` is carried as a string so that a non-numeric value can be reported
/// as its own violation instead of failing upstream of the validator.
#[derive(Debug, Clone, Default)]
pub struct ValidationRequest<'a> {
    pub username: Option<&'a str>,
    pub target: Option<&'a str>,
    pub role: Option<&'a str>,
    pub item_type: Option<&'a str>,
    pub year: Option<&'a str>,
}

/// Check the supplied fields and return every violation in check order.
///
/// An empty list signals validity. `current_year` is the inclusive upper
/// bound of the year range; the caller reads it from the clock so the range
/// grows each calendar year. The function itself never fails and has no side
/// effects, so validating the same request twice yields the same list.
pub fn validate_inputs(
    request: &ValidationRequest<'_>,
    token: &str,
    current_year: i32,
) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(username) = request.username {
        if username.trim().is_empty() {
            errors.push("Username cannot be empty".to_string());
        }
    }

    if let Some(target) = request.target {
        if target.trim().is_empty() {
            errors.push("Target (group/project) cannot be empty".to_string());
        }
    }

    if let Some(role) = request.role {
        if access_level(role).is_none() {
            errors.push(format!(
                "Invalid role: {role}. Valid roles are: {}",
                role_names()
            ));
        }
    }

    if let Some(item_type) = request.item_type {
        if item_type != "mr" && item_type != "issues" {
            errors.push(format!(
                "Invalid item type: {item_type}. Must be 'mr' or 'issues'"
            ));
        }
    }

    if let Some(year) = request.year {
        // The two year checks are mutually exclusive: either the value is not
        // an integer, or it is one and may be out of range.
        match year.trim().parse::<i32>() {
            Ok(parsed) => {
                if parsed < EARLIEST_YEAR || parsed > current_year {
                    errors.push(format!(
                        "Invalid year: {parsed}. Must be between {EARLIEST_YEAR} and {current_year}"
                    ));
                }
            }
            Err(_) => {
                errors.push(format!("Year must be a valid integer, got '{year}'"));
            }
        }
    }

    if token.is_empty() {
        errors.push("GITLAB_TOKEN environment variable is not set".to_string());
    }

    errors
}
