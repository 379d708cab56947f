//! Attendance records and the wire DTOs for check-in and review flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::subject_class::ClassDetail;

/// Authoritative attendance status for a (student, class) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    ExcusedAbsent,
}

impl AttendanceStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::ExcusedAbsent => "ExcusedAbsent",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(AttendanceStatus::Present),
            "Absent" => Some(AttendanceStatus::Absent),
            "Late" => Some(AttendanceStatus::Late),
            "ExcusedAbsent" => Some(AttendanceStatus::ExcusedAbsent),
            _ => None,
        }
    }
}

/// A geo-validated attendance record.
#[derive(Debug, Clone, Serialize)]
pub struct GeoAttendance {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub created_at: DateTime<Utc>,
}

/// A staff-marked attendance record; overrides any geo record for the pair.
#[derive(Debug, Clone, Serialize)]
pub struct StaffAttendance {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub status: AttendanceStatus,
    pub marked_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for a geo check-in.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckInRequest {
    /// Identity token from the app's sign-in flow
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    /// Device-reported accuracy radius in meters; missing means a client
    /// too old to send it, which the version gate rejects.
    #[validate(custom(function = "shared::validation::validate_accuracy"))]
    pub accuracy: Option<f64>,

    /// Client app version, gated against the configured minimum.
    pub version: Option<String>,
}

/// Response payload for an accepted (or idempotently repeated) check-in.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub class: String,
    pub time: DateTime<Utc>,
}

/// One row of a student's own attendance history.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceHistoryEntry {
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub attendance_time: Option<DateTime<Utc>>,
}

/// Current class detail plus the caller's own attendance time.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentClassResponse {
    #[serde(flatten)]
    pub class: ClassDetail,
    pub attendance_time: Option<DateTime<Utc>>,
}

/// One student's resolved status in a class roster.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterEntry {
    pub mail: String,
    pub name: String,
    pub status: AttendanceStatus,
}

/// Bulk view of the resolved attendance for one class.
#[derive(Debug, Clone, Serialize)]
pub struct RosterResponse {
    pub current_class: ClassDetail,
    pub all_attendance: Vec<RosterEntry>,
}

/// Staff request to mark a student's attendance.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub mail: String,
    pub status: AttendanceStatus,
}

/// Response after a staff override.
#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendanceResponse {
    pub mail: String,
    pub status: AttendanceStatus,
}

/// One class row in a per-student overview; `status` is null for classes
/// where no evaluation of any kind happened.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentClassEntry {
    pub name: String,
    pub class_start_time: DateTime<Utc>,
    pub class_end_time: DateTime<Utc>,
    pub is_attendance_mandatory: bool,
    pub status: Option<AttendanceStatus>,
}

/// Identity block of a per-student overview.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub name: String,
    pub mail: String,
}

/// Per-student view across all classes.
#[derive(Debug, Clone, Serialize)]
pub struct StudentOverviewResponse {
    pub student: StudentSummary,
    pub all_attendance: Vec<StudentClassEntry>,
}
