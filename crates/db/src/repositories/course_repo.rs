//! Repository for the `cursos` table.
//!
//! Every read joins in the teacher names so rows serialize directly to
//! the documented shape (course fields + `professores` name list).

use escola_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};

/// Aggregating SELECT shared by the read queries.
const SELECT_WITH_TEACHERS: &str = "SELECT c.id, c.codigo, c.descricao, c.nivel, \
            array_remove(array_agg(p.nome ORDER BY p.nome), NULL) AS professores \
     FROM cursos c \
     LEFT JOIN professor_cursos pc ON pc.curso_id = c.id \
     LEFT JOIN professores p ON p.id = pc.professor_id";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row (no teachers yet).
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO cursos (codigo, descricao, nivel) \
             VALUES ($1, $2, COALESCE($3, 'B')) \
             RETURNING id",
        )
        .bind(&input.codigo)
        .bind(&input.descricao)
        .bind(&input.nivel)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT_WITH_TEACHERS} WHERE c.id = $1 GROUP BY c.id");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("{SELECT_WITH_TEACHERS} WHERE c.id = $1 GROUP BY c.id");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses ordered by id.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Course>, sqlx::Error> {
        let query =
            format!("{SELECT_WITH_TEACHERS} GROUP BY c.id ORDER BY c.id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Course>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of courses.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cursos")
            .fetch_one(pool)
            .await
    }

    /// Update a course. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE cursos SET \
                codigo = COALESCE($2, codigo), \
                descricao = COALESCE($3, descricao), \
                nivel = COALESCE($4, nivel) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.codigo)
        .bind(&input.descricao)
        .bind(&input.nivel)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a course. Enrollments and grades cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cursos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
