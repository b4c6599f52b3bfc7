//! Handlers for the `/estudantes/` resource and its sub-listings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use escola_core::error::CoreError;
use escola_core::types::DbId;
use escola_db::models::student::{CreateStudent, StudentFilter, UpdateStudent};
use escola_db::repositories::{EnrollmentRepo, GradeRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{PageParams, StudentListParams};
use crate::response::Page;
use crate::state::AppState;

/// Translate the legacy filter aliases into a [`StudentFilter`].
///
/// `curso`/`curso_id` filter by enrolled course id; a non-numeric value
/// falls back to a course-code match. `curso_codigo`/`codigo` always
/// match by code.
fn build_filter(params: &StudentListParams) -> StudentFilter {
    let mut filter = StudentFilter {
        nome: params.q.clone().or_else(|| params.nome.clone()),
        ..Default::default()
    };

    if let Some(raw) = params.curso.as_ref().or(params.curso_id.as_ref()) {
        match raw.parse::<DbId>() {
            Ok(id) => filter.curso_id = Some(id),
            Err(_) => filter.curso_codigo = Some(raw.clone()),
        }
    }
    if let Some(code) = params.curso_codigo.as_ref().or(params.codigo.as_ref()) {
        filter.curso_codigo = Some(code.clone());
    }
    filter
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /estudantes/?page=&q=&curso=
///
/// Paginated student listing with optional name and enrolled-course filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = build_filter(&params);
    let page = params.page();
    let size = state.config.page_size;

    let count = StudentRepo::count(&state.pool, &filter).await?;
    let results = StudentRepo::list(&state.pool, &filter, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        "/estudantes/",
        page,
        size,
    )))
}

/// POST /estudantes/
///
/// Create a student. Requires write access.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateStudent>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    let student = StudentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /estudantes/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// PUT /estudantes/{id}/
///
/// Update a student. Requires write access.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// DELETE /estudantes/{id}/
///
/// Delete a student. Enrollments and grades cascade. Admin only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_delete()?;
    if !StudentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /estudantes/{id}/matriculas/
///
/// A student's enrollments with course description and spelled-out
/// period. Requires authentication; an unknown student id yields an
/// empty page rather than a 404, matching the legacy surface.
pub async fn enrollments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = EnrollmentRepo::count_for_student(&state.pool, id).await?;
    let results =
        EnrollmentRepo::list_for_student(&state.pool, id, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        &format!("/estudantes/{id}/matriculas/"),
        page,
        size,
    )))
}

/// GET /estudantes/{id}/notas/
///
/// A student's grades, newest date first.
pub async fn grades(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = GradeRepo::count_for_student(&state.pool, id).await?;
    let results = GradeRepo::list_for_student(&state.pool, id, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        &format!("/estudantes/{id}/notas/"),
        page,
        size,
    )))
}
