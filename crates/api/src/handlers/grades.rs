//! Handlers for the `/notas/` resource.
//!
//! Grade writes are the only business-rule gate in the API. The rules run
//! in a fixed order and the first failure wins; nothing is persisted on
//! rejection. Rules 1-3 are the pure functions in `escola_core::grades`;
//! rules 4 (enrollment membership) and 5 (tuple uniqueness) consult the
//! repositories here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use escola_core::error::CoreError;
use escola_core::grades::{self, GradeRuleError, DEFAULT_EVALUATION};
use escola_core::types::DbId;
use escola_db::models::grade::{GradePayload, NewGrade};
use escola_db::repositories::{EnrollmentRepo, GradeRepo};

use crate::error::{AppError, AppResult, FieldErrors};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// Run the full rule chain over a write payload. Returns the validated
/// row ready for insert/update; `exclude_id` skips the row being updated
/// in the duplicate check.
async fn validate(
    state: &AppState,
    payload: &GradePayload,
    exclude_id: Option<DbId>,
) -> Result<NewGrade, AppError> {
    let valor = grades::parse_value(payload.valor.as_ref())?;
    grades::validate_value(valor)?;

    let today = Utc::now().date_naive();
    grades::validate_date(payload.data, today)?;
    let data = payload
        .data
        .ok_or_else(|| AppError::Fields(FieldErrors::single("data", "date is required")))?;

    let enrolled = EnrollmentRepo::exists(&state.pool, payload.estudante, payload.curso).await?;
    if !enrolled {
        return Err(GradeRuleError::NotEnrolled.into());
    }

    let avaliacao = payload
        .avaliacao
        .clone()
        .unwrap_or_else(|| DEFAULT_EVALUATION.to_string());

    let duplicate = GradeRepo::exists_duplicate(
        &state.pool,
        payload.estudante,
        payload.curso,
        &avaliacao,
        data,
        exclude_id,
    )
    .await?;
    if duplicate {
        return Err(GradeRuleError::Duplicate.into());
    }

    Ok(NewGrade {
        estudante_id: payload.estudante,
        curso_id: payload.curso,
        valor,
        avaliacao,
        data,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /notas/?page=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = GradeRepo::count(&state.pool).await?;
    let results = GradeRepo::list(&state.pool, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        "/notas/",
        page,
        size,
    )))
}

/// POST /notas/
///
/// Record a grade after the full validation chain passes. Requires write
/// access. Returns the canonical representation with the student name and
/// course code denormalized for display.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<GradePayload>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    let new_grade = validate(&state, &payload, None).await?;
    let grade = GradeRepo::create(&state.pool, &new_grade).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

/// PUT /notas/{id}/
///
/// Replace a grade, re-running the same validation chain. Requires write
/// access.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(payload): Json<GradePayload>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    let new_grade = validate(&state, &payload, Some(id)).await?;
    let grade = GradeRepo::update(&state.pool, id, &new_grade)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Grade", id }))?;
    Ok(Json(grade))
}
