//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameter (`?page=`), 1-based.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

impl PageParams {
    /// The requested page, clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Query parameters for `GET /estudantes/`.
///
/// The legacy surface accepts several aliases: `q`/`nome` filter by name
/// substring, `curso`/`curso_id` by enrolled course id (falling back to a
/// code match when the value is not numeric), `curso_codigo`/`codigo` by
/// course code.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    pub page: Option<i64>,
    pub q: Option<String>,
    pub nome: Option<String>,
    pub curso: Option<String>,
    pub curso_id: Option<String>,
    pub curso_codigo: Option<String>,
    pub codigo: Option<String>,
}

impl StudentListParams {
    /// The requested page, clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}
