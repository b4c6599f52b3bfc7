//! Grade entity model and DTOs.

use chrono::NaiveDate;
use escola_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A grade row joined with the student name and course code, the canonical
/// representation returned by every grade endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grade {
    pub id: DbId,
    #[serde(rename = "estudante")]
    pub estudante_id: DbId,
    pub estudante_nome: String,
    #[serde(rename = "curso")]
    pub curso_id: DbId,
    pub curso_codigo: String,
    pub valor: f64,
    pub avaliacao: String,
    pub data: NaiveDate,
}

/// Raw grade write payload as received from the API.
///
/// `valor` stays a raw JSON value here: the grading rules own the
/// present/parseable decision and its error wording, so deserialization
/// must not reject it first.
#[derive(Debug, Clone, Deserialize)]
pub struct GradePayload {
    pub estudante: DbId,
    pub curso: DbId,
    pub valor: Option<serde_json::Value>,
    pub avaliacao: Option<String>,
    pub data: Option<NaiveDate>,
}

/// A fully validated grade, ready to insert.
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub estudante_id: DbId,
    pub curso_id: DbId,
    pub valor: f64,
    pub avaliacao: String,
    pub data: NaiveDate,
}
