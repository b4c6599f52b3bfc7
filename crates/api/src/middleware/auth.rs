//! Token-based authentication extractors for Axum handlers.
//!
//! Reads take no extractor (anonymous access is read-only but allowed);
//! handlers that create or update require [`AuthUser`] plus a tier check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use escola_core::error::CoreError;
use escola_core::groups;
use escola_db::models::user::User;
use escola_db::repositories::ApiTokenRepo;

use crate::auth::token::hash_token;
use crate::error::AppError;
use crate::state::AppState;

/// Canonical `detail` message for a missing credential.
const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";

/// Authenticated user resolved from an `Authorization: Token <value>`
/// header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     user.require_write()?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved user row (active users only).
    pub user: User,
}

impl AuthUser {
    /// Reject callers whose group does not grant create/update access.
    /// Superusers always pass.
    pub fn require_write(&self) -> Result<(), AppError> {
        if self.user.is_superuser || groups::can_write(&self.user.permission_group) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission to perform this action.".into(),
            )))
        }
    }

    /// Reject callers whose group does not grant delete access.
    /// Superusers always pass.
    pub fn require_delete(&self) -> Result<(), AppError> {
        if self.user.is_superuser || groups::can_delete(&self.user.permission_group) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission to perform this action.".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(MISSING_CREDENTIALS.into()))
            })?;

        let token = auth_header.strip_prefix("Token ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Token <value>".into(),
            ))
        })?;

        let user = ApiTokenRepo::find_user_by_token_hash(&state.pool, &hash_token(token))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token.".into())))?;

        Ok(AuthUser { user })
    }
}
