//! Student entity model and DTOs.

use chrono::NaiveDate;
use escola_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `estudantes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub nome: String,
    pub email: String,
    pub cpf: String,
    pub data_nascimento: NaiveDate,
    pub celular: String,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub nome: String,
    pub email: String,
    pub cpf: String,
    pub data_nascimento: NaiveDate,
    pub celular: String,
}

/// DTO for updating an existing student. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub data_nascimento: Option<NaiveDate>,
    pub celular: Option<String>,
}

/// Optional list filters for `GET /estudantes/`.
///
/// `curso_id` and `curso_codigo` both filter by enrolled course; the
/// handler decides which one a raw `curso` query parameter feeds (numeric
/// values filter by id, anything else falls back to the course code).
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Case-insensitive name substring.
    pub nome: Option<String>,
    /// Enrolled course id.
    pub curso_id: Option<DbId>,
    /// Enrolled course code (case-insensitive exact match).
    pub curso_codigo: Option<String>,
}
