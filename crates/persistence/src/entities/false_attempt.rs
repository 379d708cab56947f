//! False attempt entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the false_attempts table. Audit only; these
/// rows never feed into a resolved attendance status.
#[derive(Debug, Clone, FromRow)]
pub struct FalseAttemptEntity {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub created_at: DateTime<Utc>,
}
