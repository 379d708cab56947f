//! Subject class repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::SubjectClassEntity;
use crate::metrics::QueryTimer;

/// Repository for subject-class-related database operations.
#[derive(Clone)]
pub struct SubjectClassRepository {
    pool: PgPool,
}

impl SubjectClassRepository {
    /// Creates a new SubjectClassRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new subject class.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        class_start_time: DateTime<Utc>,
        class_end_time: DateTime<Utc>,
        attendance_start_time: DateTime<Utc>,
        attendance_end_time: DateTime<Utc>,
        is_attendance_mandatory: bool,
        latitude: f64,
        longitude: f64,
        radius_meters: f32,
    ) -> Result<SubjectClassEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_subject_class");
        let result = sqlx::query_as::<_, SubjectClassEntity>(
            r#"
            INSERT INTO subject_classes (name, class_start_time, class_end_time,
                                         attendance_start_time, attendance_end_time,
                                         is_attendance_mandatory, latitude, longitude,
                                         radius_meters)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(class_start_time)
        .bind(class_end_time)
        .bind(attendance_start_time)
        .bind(attendance_end_time)
        .bind(is_attendance_mandatory)
        .bind(latitude)
        .bind(longitude)
        .bind(radius_meters)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a subject class by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SubjectClassEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_subject_class_by_id");
        let result = sqlx::query_as::<_, SubjectClassEntity>(
            r#"
            SELECT * FROM subject_classes WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find every class in session at `now`. A class counts as active over
    /// the envelope of its class period and attendance window; picking one
    /// among overlapping candidates is a domain decision, not a query one.
    pub async fn find_active(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<SubjectClassEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_subject_classes");
        let result = sqlx::query_as::<_, SubjectClassEntity>(
            r#"
            SELECT * FROM subject_classes
            WHERE LEAST(class_start_time, attendance_start_time) <= $1
              AND $1 <= GREATEST(class_end_time, attendance_end_time)
            ORDER BY attendance_start_time ASC, id ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

}
