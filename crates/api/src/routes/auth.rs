//! Route definitions for token auth and the caller profile.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /api-token-auth/
/// GET  /me/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api-token-auth/", post(auth::obtain_token))
        .route("/me/", get(auth::me))
}
