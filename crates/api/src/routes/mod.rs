pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod health;
pub mod students;
pub mod teachers;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// Every path keeps its legacy trailing slash -- consumers construct URLs
/// as `{base}/estudantes/` and the router must match them exactly.
///
/// ```text
/// /estudantes/                      GET list, POST create
/// /estudantes/{id}/                 GET, PUT, DELETE
/// /estudantes/{id}/matriculas/      GET (authenticated)
/// /estudantes/{id}/notas/           GET
/// /cursos/                          GET list, POST create
/// /cursos/{id}/                     GET, PUT, DELETE
/// /cursos/{id}/matriculas/          GET
/// /cursos/{id}/notas/               GET
/// /professores/                     GET list, POST create
/// /matriculas/                      GET list, POST create
/// /notas/                           GET list, POST create
/// /notas/{id}/                      PUT
/// /api-token-auth/                  POST
/// /me/                              GET (authenticated)
/// ```
///
/// The health route lives in [`health`] and is merged separately by the
/// binary, next to this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(students::router())
        .merge(courses::router())
        .merge(teachers::router())
        .merge(enrollments::router())
        .merge(grades::router())
        .merge(auth::router())
}
