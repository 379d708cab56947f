//! Student registration handler.

use axum::{extract::State, Json};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::student::{RegisterRequest, RegisterResponse, Student};
use persistence::repositories::StudentRepository;
use shared::validation::mail_in_allowlist;

/// Registers a student, or re-registers an existing one.
///
/// Identity comes from the signed token in the body: `iss` carries the mail
/// address, `did` the device token. The device token binds on first
/// registration and never rebinds; a token from a different installation is
/// turned away so one account cannot mark attendance from two phones.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    request.validate()?;

    let claims = state.verifier.verify(&request.jwt_token)?;
    let mail = claims.iss.to_lowercase();

    let allowed = &state.config.attendance.allowed_mail_domains;
    if !allowed.is_empty() && !mail_in_allowlist(&mail, allowed) {
        return Err(ApiError::DomainNotAllowed(allowed.join(" or ")));
    }

    let students = StudentRepository::new(state.pool.clone());

    let student = match students.find_by_mail(&mail).await? {
        Some(existing) => {
            if let Some(ref bound) = existing.device_token {
                if *bound != claims.did {
                    tracing::warn!(mail = %mail, "Registration from a second device rejected");
                    return Err(ApiError::DeviceConflict);
                }
            } else {
                students
                    .bind_device_token_if_unset(existing.id, &claims.did)
                    .await?;
            }

            if existing.name.is_none() {
                students.set_name_if_unset(existing.id, &request.name).await?;
            }

            // Re-read so the response reflects whichever writes landed.
            students
                .find_by_mail(&mail)
                .await?
                .ok_or(ApiError::UnknownIdentity)?
        }
        None => {
            students
                .create(&mail, Some(&request.name), Some(&claims.did))
                .await?
        }
    };

    let student: Student = student.into();
    Ok(Json(RegisterResponse {
        mail: student.mail.clone(),
        name: student.display_name().to_string(),
        token: student.device_token,
        status: "success".to_string(),
    }))
}
