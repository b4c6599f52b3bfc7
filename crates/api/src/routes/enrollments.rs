//! Route definitions for enrollments.

use axum::routing::get;
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Routes mounted at `/matriculas/`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/matriculas/",
        get(enrollments::list).post(enrollments::create),
    )
}
