//! Repository for the `professores` table and its course links.

use escola_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher};

/// Aggregating SELECT shared by the read queries.
const SELECT_WITH_COURSES: &str = "SELECT p.id, p.nome, p.email, p.celular, \
            array_remove(array_agg(c.codigo ORDER BY c.codigo), NULL) AS cursos \
     FROM professores p \
     LEFT JOIN professor_cursos pc ON pc.professor_id = p.id \
     LEFT JOIN cursos c ON c.id = pc.curso_id";

/// Provides CRUD operations for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Insert a new teacher, returning the created row (no courses yet).
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO professores (nome, email, celular) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(&input.nome)
        .bind(&input.email)
        .bind(&input.celular)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT_WITH_COURSES} WHERE p.id = $1 GROUP BY p.id");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a teacher by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!("{SELECT_WITH_COURSES} WHERE p.id = $1 GROUP BY p.id");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List teachers ordered by id.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Teacher>, sqlx::Error> {
        let query =
            format!("{SELECT_WITH_COURSES} GROUP BY p.id ORDER BY p.id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Teacher>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of teachers.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM professores")
            .fetch_one(pool)
            .await
    }

    /// Link a teacher to a course. Idempotent.
    pub async fn assign_course(
        pool: &PgPool,
        teacher_id: DbId,
        course_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO professor_cursos (professor_id, curso_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(teacher_id)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
