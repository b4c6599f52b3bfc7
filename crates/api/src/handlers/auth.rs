//! Handlers for token obtain (`/api-token-auth/`) and `/me/`.

use axum::extract::State;
use axum::Json;
use escola_db::models::user::UserProfile;
use escola_db::repositories::{ApiTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult, FieldErrors};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /api-token-auth/`.
#[derive(Debug, Deserialize)]
pub struct ObtainTokenRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful token obtain.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// The rejection for bad credentials, rendered as a field-keyed map like
/// any other validation failure.
fn invalid_credentials() -> AppError {
    AppError::Fields(FieldErrors::single(
        "non_field_errors",
        "Unable to log in with provided credentials.",
    ))
}

/// POST /api-token-auth/
///
/// Verify username and password, then issue a fresh opaque token. Each
/// successful call rotates the user's token (only its hash is stored).
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(input): Json<ObtainTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(invalid_credentials());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let (plaintext, hash) = generate_token();
    ApiTokenRepo::store(&state.pool, user.id, &hash).await?;

    tracing::info!(user_id = user.id, "Issued API token");
    Ok(Json(TokenResponse { token: plaintext }))
}

/// GET /me/
///
/// Return the authenticated caller's profile.
pub async fn me(auth: AuthUser) -> AppResult<Json<UserProfile>> {
    Ok(Json(UserProfile::from(&auth.user)))
}
