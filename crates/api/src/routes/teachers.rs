//! Route definitions for teachers.

use axum::routing::get;
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/professores/`.
pub fn router() -> Router<AppState> {
    Router::new().route("/professores/", get(teachers::list).post(teachers::create))
}
