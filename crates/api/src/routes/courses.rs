//! Route definitions for courses.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/cursos/`.
///
/// ```text
/// GET/POST  /cursos/
/// GET/PUT/DELETE /cursos/{id}/
/// GET       /cursos/{id}/matriculas/
/// GET       /cursos/{id}/notas/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cursos/", get(courses::list).post(courses::create))
        .route(
            "/cursos/{id}/",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
        .route("/cursos/{id}/matriculas/", get(courses::enrollments))
        .route("/cursos/{id}/notas/", get(courses::grades))
}
