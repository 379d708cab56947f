//! False attempt repository for database operations.

use sqlx::PgPool;

use crate::entities::FalseAttemptEntity;
use crate::metrics::QueryTimer;

/// Repository for the rejected check-in audit trail.
#[derive(Clone)]
pub struct FalseAttemptRepository {
    pool: PgPool,
}

impl FalseAttemptRepository {
    /// Creates a new FalseAttemptRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a rejected check-in attempt. Every out-of-bounds submission
    /// is kept, so repeats from the same pair accumulate.
    pub async fn create(
        &self,
        student_id: i64,
        class_id: i64,
        latitude: f64,
        longitude: f64,
        accuracy: f64,
    ) -> Result<FalseAttemptEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_false_attempt");
        let result = sqlx::query_as::<_, FalseAttemptEntity>(
            r#"
            INSERT INTO false_attempts (student_id, class_id, latitude, longitude, accuracy)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(student_id)
        .bind(class_id)
        .bind(latitude)
        .bind(longitude)
        .bind(accuracy)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count attempts recorded for a pair.
    pub async fn count_for_pair(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_false_attempts_for_pair");
        let count: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM false_attempts
            WHERE student_id = $1 AND class_id = $2
            "#,
        )
        .bind(student_id)
        .bind(class_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        count.map(|c| c.0)
    }
}
