//! Repository for the `api_tokens` table.
//!
//! One active token per user; storing a new hash replaces the previous
//! one, which is how re-authentication rotates the credential.

use escola_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Provides token persistence and token-to-user resolution.
pub struct ApiTokenRepo;

impl ApiTokenRepo {
    /// Store the hash of a freshly issued token for a user, replacing any
    /// previous token.
    pub async fn store(pool: &PgPool, user_id: DbId, token_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO api_tokens (user_id, token_hash) VALUES ($1, $2) \
             ON CONFLICT (user_id) \
             DO UPDATE SET token_hash = EXCLUDED.token_hash, created_at = now()",
        )
        .bind(user_id)
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Resolve a token hash to its active owner, if any.
    pub async fn find_user_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.password_hash, u.is_superuser, \
                    u.is_staff, u.permission_group, u.is_active, u.created_at \
             FROM api_tokens t \
             JOIN users u ON u.id = t.user_id \
             WHERE t.token_hash = $1 AND u.is_active",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }
}
