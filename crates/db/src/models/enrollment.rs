//! Enrollment entity model and DTOs.

use escola_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `matriculas` table.
///
/// On the wire the foreign keys appear as `estudante` / `curso`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    #[serde(rename = "estudante")]
    pub estudante_id: DbId,
    #[serde(rename = "curso")]
    pub curso_id: DbId,
    pub periodo: String,
}

/// DTO for creating a new enrollment. `periodo` defaults to morning.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollment {
    pub estudante: DbId,
    pub curso: DbId,
    pub periodo: Option<String>,
}

/// One entry of a student's enrollment listing: the course id, its
/// description, and the period spelled out.
#[derive(Debug, Clone, Serialize)]
pub struct StudentEnrollmentRow {
    pub curso_id: DbId,
    pub curso: String,
    pub periodo: String,
}

/// One entry of a course's enrollment listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseEnrollmentRow {
    pub estudante_nome: String,
}
