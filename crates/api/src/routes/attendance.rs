//! Student attendance handlers: check-in and self-service views.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StaffUser;
use crate::middleware::metrics::{record_check_in_accepted, record_check_in_rejected};
use domain::models::attendance::{
    AttendanceHistoryEntry, CheckInRequest, CheckInResponse, CurrentClassResponse, RosterEntry,
    RosterResponse,
};
use domain::models::subject_class::{ClassDetail, SubjectClass};
use domain::services::{geofence, ledger, schedule};
use persistence::entities::StudentEntity;
use persistence::repositories::{
    AttendanceRepository, FalseAttemptRepository, StudentRepository, SubjectClassRepository,
};
use shared::version::is_version_below_minimum;

/// Body for self-service views that carry only the identity token.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

/// Resolves the calling student from an identity token in a request body.
///
/// The token's device claim must match the bound device; a valid token from
/// another installation is treated the same as a second-device registration.
async fn resolve_student(state: &AppState, token: &str) -> Result<StudentEntity, ApiError> {
    let claims = state.verifier.verify(token)?;
    let mail = claims.iss.to_lowercase();

    let student = StudentRepository::new(state.pool.clone())
        .find_by_mail(&mail)
        .await?
        .ok_or(ApiError::UnknownIdentity)?;

    match student.device_token {
        Some(ref bound) if *bound != claims.did => Err(ApiError::DeviceConflict),
        _ => Ok(student),
    }
}

fn display_name(name: Option<&str>, mail: &str) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => mail.split('@').next().unwrap_or(mail).to_string(),
    }
}

/// Resolves the class attendance applies to at `now`, applying the
/// deterministic tie-break when schedule envelopes overlap.
pub(crate) async fn current_class(
    state: &AppState,
    now: chrono::DateTime<Utc>,
) -> Result<Option<SubjectClass>, ApiError> {
    let candidates: Vec<SubjectClass> = SubjectClassRepository::new(state.pool.clone())
        .find_active(now)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(schedule::select_current(&candidates).cloned())
}

/// Geo check-in.
///
/// Order of gates matters for the messages the app shows: version, identity,
/// active class, attendance window, then the geofence itself. An
/// out-of-bounds point is logged as a false attempt before rejection; a
/// repeated in-bounds check-in returns the original record unchanged.
pub async fn check_in(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, ApiError> {
    request.validate()?;

    // Clients predating the accuracy field cannot be geofence-judged.
    let (accuracy, version) = match (request.accuracy, request.version.as_deref()) {
        (Some(accuracy), Some(version)) => (accuracy, version),
        _ => {
            record_check_in_rejected("stale_client");
            return Err(ApiError::StaleClient);
        }
    };

    if is_version_below_minimum(version, &state.config.attendance.min_app_version) {
        record_check_in_rejected("stale_client");
        return Err(ApiError::StaleClient);
    }

    let student = resolve_student(&state, &request.jwt_token).await?;

    let now = Utc::now();
    let class = current_class(&state, now).await?.ok_or_else(|| {
        record_check_in_rejected("no_active_class");
        ApiError::NoActiveClass
    })?;

    if !class.is_in_attendance_window(now) {
        record_check_in_rejected("outside_window");
        return Err(ApiError::OutsideWindow {
            window: class.attendance_window_label(),
        });
    }

    let decision = geofence::evaluate(
        &class.boundary,
        request.latitude,
        request.longitude,
        accuracy,
        &state.config.geofence_policy(),
    )
    .map_err(|e| {
        record_check_in_rejected("imprecise_location");
        ApiError::from(e)
    })?;

    if !decision.is_inside() {
        FalseAttemptRepository::new(state.pool.clone())
            .create(
                student.id,
                class.id,
                request.latitude,
                request.longitude,
                accuracy,
            )
            .await?;
        record_check_in_rejected("outside_geofence");
        tracing::info!(
            student_id = student.id,
            class_id = class.id,
            "Check-in outside classroom boundary"
        );
        return Err(ApiError::OutsideGeofence);
    }

    let record = AttendanceRepository::new(state.pool.clone())
        .insert_geo_if_absent(
            student.id,
            class.id,
            request.latitude,
            request.longitude,
            accuracy,
        )
        .await?;

    record_check_in_accepted();
    Ok(Json(CheckInResponse {
        class: class.name,
        time: record.created_at,
    }))
}

/// All resolved attendance for the calling student.
///
/// Only classes with at least one record appear; `attendance_time` is the
/// earliest record's creation time.
pub async fn mine(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<Vec<AttendanceHistoryEntry>>, ApiError> {
    let student = resolve_student(&state, &request.jwt_token).await?;

    let rows = AttendanceRepository::new(state.pool.clone())
        .history_for_student(student.id)
        .await?;

    let entries = rows
        .into_iter()
        .map(|row| AttendanceHistoryEntry {
            name: row.name,
            class_start_time: row.class_start_time,
            class_end_time: row.class_end_time,
            attendance_time: ledger::first_recorded_at(row.geo_at, row.manual_at),
        })
        .collect();

    Ok(Json(entries))
}

/// Current class detail plus the caller's own attendance time.
pub async fn current(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<CurrentClassResponse>, ApiError> {
    let student = resolve_student(&state, &request.jwt_token).await?;

    let class = current_class(&state, Utc::now())
        .await?
        .ok_or(ApiError::NoActiveClass)?;

    let times = AttendanceRepository::new(state.pool.clone())
        .pair_times(student.id, class.id)
        .await?;

    Ok(Json(CurrentClassResponse {
        class: ClassDetail::from(&class),
        attendance_time: ledger::first_recorded_at(times.geo_at, times.manual_at),
    }))
}

/// Builds the bulk roster view for one class: every registered student with
/// their resolved status (no record of any kind resolves to Absent).
pub(crate) async fn build_roster(
    state: &AppState,
    class: &SubjectClass,
) -> Result<RosterResponse, ApiError> {
    let rows = AttendanceRepository::new(state.pool.clone())
        .roster_for_class(class.id)
        .await?;

    let all_attendance = rows
        .into_iter()
        .map(|row| RosterEntry {
            status: ledger::resolve_status(row.manual(), row.has_geo),
            name: display_name(row.name.as_deref(), &row.mail),
            mail: row.mail,
        })
        .collect();

    Ok(RosterResponse {
        current_class: ClassDetail::from(class),
        all_attendance,
    })
}

/// Bulk roster for the current class.
///
/// Non-staff callers get a TTL-cached snapshot; staff always read fresh.
pub async fn current_roster(
    State(state): State<AppState>,
    staff: Option<StaffUser>,
) -> Result<Json<RosterResponse>, ApiError> {
    let class = current_class(&state, Utc::now())
        .await?
        .ok_or(ApiError::NoActiveClass)?;

    if staff.is_none() {
        if let Some(snapshot) = state.roster_cache.get(class.id).await {
            return Ok(Json((*snapshot).clone()));
        }
    }

    let roster = build_roster(&state, &class).await?;

    if staff.is_none() {
        state.roster_cache.put(class.id, roster.clone()).await;
    }

    Ok(Json(roster))
}
