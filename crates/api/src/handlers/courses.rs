//! Handlers for the `/cursos/` resource and its sub-listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use escola_core::error::CoreError;
use escola_core::types::DbId;
use escola_core::vocab;
use escola_db::models::course::{CreateCourse, UpdateCourse};
use escola_db::repositories::{CourseRepo, EnrollmentRepo, GradeRepo};

use crate::error::{AppError, AppResult, FieldErrors};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Reject an invalid `nivel` code with a field-keyed error.
fn check_nivel(nivel: Option<&String>) -> Result<(), AppError> {
    if let Some(nivel) = nivel {
        vocab::validate_course_level(nivel)
            .map_err(|e| AppError::Fields(FieldErrors::single("nivel", e.to_string())))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /cursos/?page=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = CourseRepo::count(&state.pool).await?;
    let results = CourseRepo::list(&state.pool, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        "/cursos/",
        page,
        size,
    )))
}

/// POST /cursos/
///
/// Create a course. Requires write access.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    check_nivel(input.nivel.as_ref())?;
    let course = CourseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /cursos/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = CourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(course))
}

/// PUT /cursos/{id}/
///
/// Update a course. Requires write access.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    check_nivel(input.nivel.as_ref())?;
    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    Ok(Json(course))
}

/// DELETE /cursos/{id}/
///
/// Delete a course. Enrollments and grades cascade. Admin only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_delete()?;
    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /cursos/{id}/matriculas/
///
/// Names of the students enrolled in a course.
pub async fn enrollments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = EnrollmentRepo::count_for_course(&state.pool, id).await?;
    let results = EnrollmentRepo::list_for_course(&state.pool, id, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        &format!("/cursos/{id}/matriculas/"),
        page,
        size,
    )))
}

/// GET /cursos/{id}/notas/
///
/// A course's grades, newest date first.
pub async fn grades(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = GradeRepo::count_for_course(&state.pool, id).await?;
    let results = GradeRepo::list_for_course(&state.pool, id, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        &format!("/cursos/{id}/notas/"),
        page,
        size,
    )))
}
