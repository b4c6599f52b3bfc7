//! API user entity model and DTOs.

use escola_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub permission_group: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Safe user representation for `GET /me/` (no password hash, no id).
///
/// `groups` carries the user's permission group name, preserving the
/// original group-list wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub groups: Vec<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
            groups: vec![user.permission_group.clone()],
        }
    }
}

/// DTO for creating a new user (seeding and tests; there is no public
/// registration endpoint).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub permission_group: String,
}
