//! Handlers for the `/matriculas/` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use escola_core::vocab;
use escola_db::models::enrollment::CreateEnrollment;
use escola_db::repositories::EnrollmentRepo;

use crate::error::{AppError, AppResult, FieldErrors};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Page;
use crate::state::AppState;

/// GET /matriculas/?page=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let size = state.config.page_size;

    let count = EnrollmentRepo::count(&state.pool).await?;
    let results = EnrollmentRepo::list(&state.pool, size, (page - 1) * size).await?;
    Ok(Json(Page::new(
        count,
        results,
        &state.config.public_base_url,
        "/matriculas/",
        page,
        size,
    )))
}

/// POST /matriculas/
///
/// Enroll a student in a course. Duplicate (student, course) pairs are
/// allowed by design. Requires write access.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateEnrollment>,
) -> AppResult<impl IntoResponse> {
    auth.require_write()?;
    if let Some(periodo) = &input.periodo {
        vocab::validate_enrollment_period(periodo)
            .map_err(|e| AppError::Fields(FieldErrors::single("periodo", e.to_string())))?;
    }
    let enrollment = EnrollmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}
