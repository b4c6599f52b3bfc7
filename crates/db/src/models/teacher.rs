//! Teacher entity model and DTOs.

use escola_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A teacher row joined with the codes of the courses they teach.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub nome: String,
    pub email: String,
    pub celular: String,
    pub cursos: Vec<String>,
}

/// DTO for creating a new teacher. Course assignment is separate.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacher {
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub celular: String,
}
