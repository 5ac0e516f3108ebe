//! Target classification and membership payloads

use serde::{Deserialize, Serialize};

/// What kind of namespace a membership target addresses.
///
/// GitLab addresses projects by their full path (`namespace/project`), so a
/// path separator in the target is what distinguishes the two. This is the
/// upstream's own naming convention, not a heuristic of ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Group,
    Project,
}

/// Classify a target as a group or a project by the presence of `/`.
pub fn classify_target(target: &str) -> TargetKind {
    if target.contains('/') {
        TargetKind::Project
    } else {
        TargetKind::Group
    }
}

/// True when the combination is unsupported upstream: projects have no
/// owner access level, only groups do.
pub fn owner_on_project(target: &str, role: &str) -> bool {
    classify_target(target) == TargetKind::Project && role.eq_ignore_ascii_case("owner")
}

/// A user as returned by the user-search endpoint. Only the id matters;
/// every other field is dropped on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: u64,
}

/// Body of the member create/update requests.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MemberPayload {
    pub user_id: u64,
    pub access_level: u8,
}

/// The message reported after a role was granted or updated.
pub fn role_assignment_message(username: &str, role: &str, target: &str) -> String {
    format!("Successfully set {username}'s role to {role} on {target}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_target() {
        assert_eq!(classify_target("backend"), TargetKind::Group);
        assert_eq!(classify_target("team/backend"), TargetKind::Project);
        assert_eq!(classify_target("team/sub/backend"), TargetKind::Project);
    }

    #[test]
    fn test_owner_on_project() {
        assert!(owner_on_project("team/backend", "owner"));
        assert!(owner_on_project("team/backend", "Owner"));
        assert!(!owner_on_project("backend", "owner"));
        assert!(!owner_on_project("team/backend", "maintainer"));
    }

    #[test]
    fn test_user_record_drops_extra_fields() {
        let users: Vec<UserRecord> = serde_json::from_value(serde_json::json!([
            {"id": 42, "username": "dev1", "state": "active", "avatar_url": null}
        ]))
        .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 42);
    }

    #[test]
    fn test_member_payload_serialization() {
        let payload = MemberPayload {
            user_id: 42,
            access_level: 30,
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            serde_json::json!({"user_id": 42, "access_level": 30})
        );
    }

    #[test]
    fn test_role_assignment_message() {
        assert_eq!(
            role_assignment_message("dev1", "developer", "backend"),
            "Successfully set dev1's role to developer on backend"
        );
    }
}
