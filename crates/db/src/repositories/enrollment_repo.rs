//! Repository for the `matriculas` table.

use escola_core::types::DbId;
use escola_core::vocab;
use sqlx::PgPool;

use crate::models::enrollment::{
    CourseEnrollmentRow, CreateEnrollment, Enrollment, StudentEnrollmentRow,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, estudante_id, curso_id, periodo";

/// Provides CRUD operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a new enrollment, returning the created row.
    ///
    /// Duplicate (student, course) pairs are allowed by design.
    pub async fn create(pool: &PgPool, input: &CreateEnrollment) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO matriculas (estudante_id, curso_id, periodo) \
             VALUES ($1, $2, COALESCE($3, 'M')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.estudante)
            .bind(input.curso)
            .bind(&input.periodo)
            .fetch_one(pool)
            .await
    }

    /// List all enrollments ordered by id.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM matriculas ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of enrollments.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM matriculas")
            .fetch_one(pool)
            .await
    }

    /// Whether at least one enrollment links the student to the course.
    ///
    /// This is the membership gate the grade validator consults.
    pub async fn exists(
        pool: &PgPool,
        estudante_id: DbId,
        curso_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM matriculas WHERE estudante_id = $1 AND curso_id = $2)",
        )
        .bind(estudante_id)
        .bind(curso_id)
        .fetch_one(pool)
        .await
    }

    /// A student's enrollments with the course description and the period
    /// spelled out, ordered by enrollment id.
    pub async fn list_for_student(
        pool: &PgPool,
        estudante_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StudentEnrollmentRow>, sqlx::Error> {
        let rows: Vec<(DbId, String, String)> = sqlx::query_as(
            "SELECT m.curso_id, c.descricao, m.periodo \
             FROM matriculas m \
             JOIN cursos c ON c.id = m.curso_id \
             WHERE m.estudante_id = $1 \
             ORDER BY m.id \
             LIMIT $2 OFFSET $3",
        )
        .bind(estudante_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(curso_id, curso, periodo)| StudentEnrollmentRow {
                curso_id,
                curso,
                periodo: vocab::enrollment_period_display(&periodo)
                    .unwrap_or("desconhecido")
                    .to_string(),
            })
            .collect())
    }

    /// Number of enrollments held by a student.
    pub async fn count_for_student(pool: &PgPool, estudante_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM matriculas WHERE estudante_id = $1")
            .bind(estudante_id)
            .fetch_one(pool)
            .await
    }

    /// Names of the students enrolled in a course, ordered by enrollment id.
    pub async fn list_for_course(
        pool: &PgPool,
        curso_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CourseEnrollmentRow>, sqlx::Error> {
        sqlx::query_as::<_, CourseEnrollmentRow>(
            "SELECT e.nome AS estudante_nome \
             FROM matriculas m \
             JOIN estudantes e ON e.id = m.estudante_id \
             WHERE m.curso_id = $1 \
             ORDER BY m.id \
             LIMIT $2 OFFSET $3",
        )
        .bind(curso_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Number of enrollments in a course.
    pub async fn count_for_course(pool: &PgPool, curso_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM matriculas WHERE curso_id = $1")
            .bind(curso_id)
            .fetch_one(pool)
            .await
    }
}
