//! Staff review and override handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{BearerIdentity, StaffUser};
use crate::middleware::metrics::record_manual_mark;
use crate::routes::attendance::build_roster;
use domain::models::attendance::{
    MarkAttendanceRequest, MarkAttendanceResponse, StudentClassEntry, StudentOverviewResponse,
    StudentSummary,
};
use domain::models::student::Student;
use domain::models::subject_class::SubjectClass;
use domain::services::ledger;
use persistence::entities::SubjectClassEntity;
use persistence::repositories::{AttendanceRepository, StudentRepository, SubjectClassRepository};

/// Whether the calling identity may mark attendance for others.
pub async fn can_mark(identity: BearerIdentity) -> Json<bool> {
    Json(identity.is_staff())
}

async fn find_student(state: &AppState, mail: &str) -> Result<Student, ApiError> {
    let student = StudentRepository::new(state.pool.clone())
        .find_by_mail(&mail.to_lowercase())
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".into()))?;
    Ok(student.into())
}

async fn mark_for_class(
    state: &AppState,
    staff: &StaffUser,
    class: &SubjectClass,
    request: MarkAttendanceRequest,
) -> Result<MarkAttendanceResponse, ApiError> {
    let student = find_student(state, &request.mail).await?;

    let record = AttendanceRepository::new(state.pool.clone())
        .upsert_manual(
            student.id,
            class.id,
            request.status.as_str(),
            &staff.mail,
        )
        .await?;

    // The override is the new source of truth; drop any cached snapshot.
    state.roster_cache.invalidate().await;
    record_manual_mark();

    tracing::info!(
        student_id = student.id,
        class_id = class.id,
        status = %record.status,
        marked_by = %staff.mail,
        "Attendance marked by staff"
    );

    Ok(MarkAttendanceResponse {
        mail: student.mail,
        status: request.status,
    })
}

/// Marks a student's attendance for the current class.
pub async fn mark_current(
    State(state): State<AppState>,
    staff: StaffUser,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<Json<MarkAttendanceResponse>, ApiError> {
    let class = crate::routes::attendance::current_class(&state, Utc::now())
        .await?
        .ok_or(ApiError::NoActiveClass)?;

    let response = mark_for_class(&state, &staff, &class, request).await?;
    Ok(Json(response))
}

/// Marks a student's attendance for an explicit class.
pub async fn mark_for_subject(
    State(state): State<AppState>,
    staff: StaffUser,
    Path(class_id): Path<i64>,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<Json<MarkAttendanceResponse>, ApiError> {
    let class: SubjectClass = find_class(&state, class_id).await?.into();

    let response = mark_for_class(&state, &staff, &class, request).await?;
    Ok(Json(response))
}

async fn find_class(state: &AppState, class_id: i64) -> Result<SubjectClassEntity, ApiError> {
    SubjectClassRepository::new(state.pool.clone())
        .find_by_id(class_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Class not found".into()))
}

/// Roster for any class, always read fresh.
pub async fn class_roster(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(class_id): Path<i64>,
) -> Result<Json<domain::models::attendance::RosterResponse>, ApiError> {
    let class: SubjectClass = find_class(&state, class_id).await?.into();
    let roster = build_roster(&state, &class).await?;
    Ok(Json(roster))
}

/// One student's attendance across every class.
///
/// Classes where the student was never evaluated report `status: null`.
pub async fn student_overview(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(mail): Path<String>,
) -> Result<Json<StudentOverviewResponse>, ApiError> {
    let student = find_student(&state, &mail).await?;

    let rows = AttendanceRepository::new(state.pool.clone())
        .overview_for_student(student.id)
        .await?;

    let all_attendance = rows
        .into_iter()
        .map(|row| StudentClassEntry {
            status: ledger::resolve_recorded(row.manual(), row.has_geo),
            name: row.name,
            class_start_time: row.class_start_time,
            class_end_time: row.class_end_time,
            is_attendance_mandatory: row.is_attendance_mandatory,
        })
        .collect();

    Ok(Json(StudentOverviewResponse {
        student: StudentSummary {
            name: student.display_name().to_string(),
            mail: student.mail,
        },
        all_attendance,
    }))
}
