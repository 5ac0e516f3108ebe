//! Role names and their GitLab access levels

/// Role-to-access-level table, in canonical declaration order.
pub const ROLE_LEVELS: [(&str, u8); 5] = [
    ("guest", 10),
    ("reporter", 20),
    ("developer", 30),
    ("maintainer", 40),
    ("owner", 50), // groups only, never projects
];

/// Look up the access level for a role name, case-insensitively.
pub fn access_level(role: &str) -> Option<u8> {
    let role = role.to_lowercase();
    ROLE_LEVELS
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, level)| *level)
}

/// The valid role names as a comma-separated list, in declaration order.
pub fn role_names() -> String {
    ROLE_LEVELS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
