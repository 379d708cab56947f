//! Student entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::student::Student;

/// Database row mapping for the students table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEntity {
    pub id: i64,
    pub mail: String,
    pub name: Option<String>,
    pub device_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StudentEntity> for Student {
    fn from(entity: StudentEntity) -> Self {
        Self {
            id: entity.id,
            mail: entity.mail,
            name: entity.name,
            device_token: entity.device_token,
            created_at: entity.created_at,
        }
    }
}
