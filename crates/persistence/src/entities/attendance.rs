//! Attendance entities and joined row mappings.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::attendance::{AttendanceStatus, GeoAttendance, StaffAttendance};

/// Database row mapping for the geo_attendance table.
#[derive(Debug, Clone, FromRow)]
pub struct GeoAttendanceEntity {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub created_at: DateTime<Utc>,
}

impl From<GeoAttendanceEntity> for GeoAttendance {
    fn from(entity: GeoAttendanceEntity) -> Self {
        Self {
            id: entity.id,
            student_id: entity.student_id,
            class_id: entity.class_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
            accuracy: entity.accuracy,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the staff_attendance table.
#[derive(Debug, Clone, FromRow)]
pub struct StaffAttendanceEntity {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub status: String,
    pub marked_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffAttendanceEntity {
    /// Parses the stored status string. Rows written by this service always
    /// parse; an unknown value would mean out-of-band writes.
    pub fn parsed_status(&self) -> Option<AttendanceStatus> {
        AttendanceStatus::parse(&self.status)
    }
}

impl From<StaffAttendanceEntity> for StaffAttendance {
    fn from(entity: StaffAttendanceEntity) -> Self {
        let status = entity.parsed_status().unwrap_or_else(|| {
            tracing::warn!(status = %entity.status, id = entity.id, "Unknown staff attendance status in storage");
            AttendanceStatus::Absent
        });
        Self {
            id: entity.id,
            student_id: entity.student_id,
            class_id: entity.class_id,
            status,
            marked_by: entity.marked_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Joined row for the class roster view: one row per student with whatever
/// records exist for the queried class.
#[derive(Debug, Clone, FromRow)]
pub struct RosterRow {
    pub mail: String,
    pub name: Option<String>,
    pub manual_status: Option<String>,
    pub has_geo: bool,
}

impl RosterRow {
    pub fn manual(&self) -> Option<AttendanceStatus> {
        self.manual_status.as_deref().and_then(AttendanceStatus::parse)
    }
}

/// Joined row for a student's own history: classes with at least one record.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub geo_at: Option<DateTime<Utc>>,
    pub manual_at: Option<DateTime<Utc>>,
}

/// Joined row for the staff per-student overview: every class, with
/// whatever records exist for the queried student.
#[derive(Debug, Clone, FromRow)]
pub struct StudentOverviewRow {
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub is_attendance_mandatory: bool,
    pub manual_status: Option<String>,
    pub has_geo: bool,
}

impl StudentOverviewRow {
    pub fn manual(&self) -> Option<AttendanceStatus> {
        self.manual_status.as_deref().and_then(AttendanceStatus::parse)
    }
}

/// Record creation times for one (student, class) pair.
#[derive(Debug, Clone, FromRow)]
pub struct PairTimesRow {
    pub geo_at: Option<DateTime<Utc>>,
    pub manual_at: Option<DateTime<Utc>>,
}
