//! Domain models and pure functions for the GitLab API
//!
//! The shell crate drives the HTTP calls; everything here only shapes and
//! checks data.

pub mod items;
pub mod membership;
pub mod roles;
pub mod validation;

pub use items::{has_four_digits, transform_item_list, year_bounds, ItemRecord, ListOutput};
pub use membership::{
    classify_target, owner_on_project, role_assignment_message, MemberPayload, TargetKind,
    UserRecord,
};
pub use roles::{access_level, role_names, ROLE_LEVELS};
pub use validation::{validate_inputs, ValidationRequest};
