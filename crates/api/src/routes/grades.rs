//! Route definitions for grades.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::grades;
use crate::state::AppState;

/// Routes mounted at `/notas/`.
///
/// ```text
/// GET/POST  /notas/
/// PUT       /notas/{id}/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notas/", get(grades::list).post(grades::create))
        .route("/notas/{id}/", put(grades::update))
}
