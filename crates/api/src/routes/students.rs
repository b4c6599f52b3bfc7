//! Route definitions for students.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/estudantes/`.
///
/// ```text
/// GET/POST  /estudantes/
/// GET/PUT/DELETE /estudantes/{id}/
/// GET       /estudantes/{id}/matriculas/
/// GET       /estudantes/{id}/notas/
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estudantes/", get(students::list).post(students::create))
        .route(
            "/estudantes/{id}/",
            get(students::get_by_id)
                .put(students::update)
                .delete(students::delete),
        )
        .route("/estudantes/{id}/matriculas/", get(students::enrollments))
        .route("/estudantes/{id}/notas/", get(students::grades))
}
