//! Student repository for database operations.

use sqlx::PgPool;

use crate::entities::StudentEntity;
use crate::metrics::QueryTimer;

/// Repository for student-related database operations.
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new student.
    pub async fn create(
        &self,
        mail: &str,
        name: Option<&str>,
        device_token: Option<&str>,
    ) -> Result<StudentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_student");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            INSERT INTO students (mail, name, device_token)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(mail)
        .bind(name)
        .bind(device_token)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a student by mail address.
    pub async fn find_by_mail(&self, mail: &str) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_mail");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT * FROM students WHERE mail = $1
            "#,
        )
        .bind(mail)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Bind a device token to a student, but only if the student has no
    /// token yet. Returns the updated row, or None when the token was
    /// already set (first device wins).
    pub async fn bind_device_token_if_unset(
        &self,
        student_id: i64,
        device_token: &str,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("bind_device_token_if_unset");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            UPDATE students
            SET device_token = $2
            WHERE id = $1 AND device_token IS NULL
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(device_token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set a student's display name if none is stored yet. A name provided
    /// on a later registration never overwrites an existing one.
    pub async fn set_name_if_unset(
        &self,
        student_id: i64,
        name: &str,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_student_name_if_unset");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            UPDATE students
            SET name = $2
            WHERE id = $1 AND name IS NULL
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
