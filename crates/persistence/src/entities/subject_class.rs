//! Subject class entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::subject_class::{ClassBoundary, SubjectClass};

/// Database row mapping for the subject_classes table.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectClassEntity {
    pub id: i64,
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub attendance_start_time: DateTime<Utc>,
    pub attendance_end_time: DateTime<Utc>,
    pub is_attendance_mandatory: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f32,
    pub created_at: DateTime<Utc>,
}

impl From<SubjectClassEntity> for SubjectClass {
    fn from(entity: SubjectClassEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            class_start_time: entity.class_start_time,
            class_end_time: entity.class_end_time,
            attendance_start_time: entity.attendance_start_time,
            attendance_end_time: entity.attendance_end_time,
            is_attendance_mandatory: entity.is_attendance_mandatory,
            boundary: ClassBoundary {
                latitude: entity.latitude,
                longitude: entity.longitude,
                radius_meters: entity.radius_meters,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subject_class_entity_to_domain() {
        let entity = SubjectClassEntity {
            id: 3,
            name: "Algorithms".to_string(),
            class_start_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            class_end_time: Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap(),
            attendance_start_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            attendance_end_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 15, 0).unwrap(),
            is_attendance_mandatory: true,
            latitude: 12.9716,
            longitude: 77.5946,
            radius_meters: 50.0,
            created_at: Utc::now(),
        };

        let class: SubjectClass = entity.clone().into();
        assert_eq!(class.id, entity.id);
        assert_eq!(class.name, entity.name);
        assert_eq!(class.boundary.latitude, entity.latitude);
        assert_eq!(class.boundary.longitude, entity.longitude);
        assert_eq!(class.boundary.radius_meters, entity.radius_meters);
        assert!(class.is_in_attendance_window(entity.attendance_start_time));
    }
}
