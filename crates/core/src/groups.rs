//! Well-known permission group constants and access-tier checks.
//!
//! These must match the seed data in
//! `20250115000002_create_users_and_tokens.sql`. Anonymous callers get
//! read-only access; write and delete rights come from the caller's group.

/// Full access: create, update, and delete on every resource.
pub const GROUP_ADMIN: &str = "api_admin";

/// Create and update, but no delete.
pub const GROUP_EDITOR: &str = "api_editor";

/// Explicit read-only group.
pub const GROUP_VIEWER: &str = "api_viewer";

/// All valid permission group names.
pub const VALID_PERMISSION_GROUPS: &[&str] = &[GROUP_ADMIN, GROUP_EDITOR, GROUP_VIEWER];

/// Whether members of `group` may create or update records.
pub fn can_write(group: &str) -> bool {
    matches!(group, GROUP_ADMIN | GROUP_EDITOR)
}

/// Whether members of `group` may delete records.
pub fn can_delete(group: &str) -> bool {
    group == GROUP_ADMIN
}
