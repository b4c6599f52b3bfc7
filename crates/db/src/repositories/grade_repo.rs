//! Repository for the `notas` table.
//!
//! Reads always join the student name and course code so every endpoint
//! returns the canonical denormalized representation. Listings order by
//! newest date first.

use chrono::NaiveDate;
use escola_core::types::DbId;
use sqlx::PgPool;

use crate::models::grade::{Grade, NewGrade};

/// Joined SELECT shared by the read queries.
const SELECT_WITH_NAMES: &str = "SELECT n.id, n.estudante_id, e.nome AS estudante_nome, \
            n.curso_id, c.codigo AS curso_codigo, n.valor, n.avaliacao, n.data \
     FROM notas n \
     JOIN estudantes e ON e.id = n.estudante_id \
     JOIN cursos c ON c.id = n.curso_id";

/// Provides CRUD operations for grades.
pub struct GradeRepo;

impl GradeRepo {
    /// Insert a validated grade, returning the canonical representation.
    ///
    /// The unique index on (estudante, curso, avaliacao, data) backstops
    /// the duplicate pre-check; a violation surfaces as a sqlx database
    /// error with the `uq_` constraint name.
    pub async fn create(pool: &PgPool, input: &NewGrade) -> Result<Grade, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO notas (estudante_id, curso_id, valor, avaliacao, data) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(input.estudante_id)
        .bind(input.curso_id)
        .bind(input.valor)
        .bind(&input.avaliacao)
        .bind(input.data)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT_WITH_NAMES} WHERE n.id = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a grade by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("{SELECT_WITH_NAMES} WHERE n.id = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a grade's mutable fields, returning the canonical
    /// representation, or `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewGrade,
    ) -> Result<Option<Grade>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE notas SET estudante_id = $2, curso_id = $3, valor = $4, \
                avaliacao = $5, data = $6 \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(input.estudante_id)
        .bind(input.curso_id)
        .bind(input.valor)
        .bind(&input.avaliacao)
        .bind(input.data)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// List all grades, newest date first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Grade>, sqlx::Error> {
        let query =
            format!("{SELECT_WITH_NAMES} ORDER BY n.data DESC, n.id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Grade>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of grades.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notas")
            .fetch_one(pool)
            .await
    }

    /// A student's grades, newest date first.
    pub async fn list_for_student(
        pool: &PgPool,
        estudante_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "{SELECT_WITH_NAMES} WHERE n.estudante_id = $1 \
             ORDER BY n.data DESC, n.id LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(estudante_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of grades held by a student.
    pub async fn count_for_student(pool: &PgPool, estudante_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notas WHERE estudante_id = $1")
            .bind(estudante_id)
            .fetch_one(pool)
            .await
    }

    /// A course's grades, newest date first.
    pub async fn list_for_course(
        pool: &PgPool,
        curso_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "{SELECT_WITH_NAMES} WHERE n.curso_id = $1 \
             ORDER BY n.data DESC, n.id LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(curso_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of grades recorded for a course.
    pub async fn count_for_course(pool: &PgPool, curso_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notas WHERE curso_id = $1")
            .bind(curso_id)
            .fetch_one(pool)
            .await
    }

    /// Whether a grade already exists for this exact (student, course,
    /// evaluation, date) tuple, excluding `exclude_id` when updating.
    pub async fn exists_duplicate(
        pool: &PgPool,
        estudante_id: DbId,
        curso_id: DbId,
        avaliacao: &str,
        data: NaiveDate,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(\
                SELECT 1 FROM notas \
                WHERE estudante_id = $1 AND curso_id = $2 \
                  AND avaliacao = $3 AND data = $4 \
                  AND ($5::bigint IS NULL OR id <> $5))",
        )
        .bind(estudante_id)
        .bind(curso_id)
        .bind(avaliacao)
        .bind(data)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }
}
