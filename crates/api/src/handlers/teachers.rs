//! Handlers for the `/professores/` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use escola_db::models::teacher::CreateTeacher;
use escola_db::repositories::TeacherRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// GET /professores/?page=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = TeacherRepo::count(&state.pool).await?;
    let results = TeacherRepo::list(&state.pool, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        "/professores/",
        page,
        size,
    )))
}

/// POST /professores/
///
/// Create a teacher. Course assignment is managed separately; the
/// `cursos` list is read-only on the wire. Requires write access.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTeacher>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    let teacher = TeacherRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}
