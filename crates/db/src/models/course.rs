//! Course entity model and DTOs.

use escola_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course row joined with the names of its teachers.
///
/// `professores` is read-only on the wire; teacher assignment goes through
/// the teachers resource.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub codigo: String,
    pub descricao: String,
    pub nivel: String,
    pub professores: Vec<String>,
}

/// DTO for creating a new course. `nivel` defaults to basic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub codigo: String,
    pub descricao: String,
    pub nivel: Option<String>,
}

/// DTO for updating an existing course. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourse {
    pub codigo: Option<String>,
    pub descricao: Option<String>,
    pub nivel: Option<String>,
}
