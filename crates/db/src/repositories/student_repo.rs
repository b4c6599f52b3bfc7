//! Repository for the `estudantes` table.

use escola_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, StudentFilter, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nome, email, cpf, data_nascimento, celular";

/// Shared WHERE clause for the filterable list/count pair. NULL parameters
/// disable their filter; the enrollment join only matters when a course
/// filter is active, and DISTINCT folds the row fan-out it introduces.
const FILTER_WHERE: &str = "($1::text IS NULL OR e.nome ILIKE '%' || $1 || '%') \
     AND ($2::bigint IS NULL OR m.curso_id = $2) \
     AND ($3::text IS NULL OR LOWER(c.codigo) = LOWER($3))";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO estudantes (nome, email, cpf, data_nascimento, celular) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.nome)
            .bind(&input.email)
            .bind(&input.cpf)
            .bind(input.data_nascimento)
            .bind(&input.celular)
            .fetch_one(pool)
            .await
    }

    /// Find a student by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM estudantes WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List students matching the filter, ordered by id.
    pub async fn list(
        pool: &PgPool,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT e.id, e.nome, e.email, e.cpf, e.data_nascimento, e.celular \
             FROM estudantes e \
             LEFT JOIN matriculas m ON m.estudante_id = e.id \
             LEFT JOIN cursos c ON c.id = m.curso_id \
             WHERE {FILTER_WHERE} \
             ORDER BY e.id \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&filter.nome)
            .bind(filter.curso_id)
            .bind(&filter.curso_codigo)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of students matching the filter.
    pub async fn count(pool: &PgPool, filter: &StudentFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(DISTINCT e.id) \
             FROM estudantes e \
             LEFT JOIN matriculas m ON m.estudante_id = e.id \
             LEFT JOIN cursos c ON c.id = m.curso_id \
             WHERE {FILTER_WHERE}"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.nome)
            .bind(filter.curso_id)
            .bind(&filter.curso_codigo)
            .fetch_one(pool)
            .await
    }

    /// Update a student. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE estudantes SET \
                nome = COALESCE($2, nome), \
                email = COALESCE($3, email), \
                cpf = COALESCE($4, cpf), \
                data_nascimento = COALESCE($5, data_nascimento), \
                celular = COALESCE($6, celular) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.email)
            .bind(&input.cpf)
            .bind(input.data_nascimento)
            .bind(&input.celular)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student. Enrollments and grades cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM estudantes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
