use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain::services::geofence::GeofenceError;
use shared::jwt::JwtError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Client too old")]
    StaleClient,

    #[error("Invalid identity token")]
    InvalidToken,

    #[error("Unknown identity")]
    UnknownIdentity,

    #[error("No active class")]
    NoActiveClass,

    #[error("Outside attendance window: {window}")]
    OutsideWindow { window: String },

    #[error("Location too imprecise")]
    ImpreciseLocation,

    #[error("Outside classroom boundary")]
    OutsideGeofence,

    #[error("Mail domain not allowed: {0}")]
    DomainNotAllowed(String),

    #[error("Device already bound")]
    DeviceConflict,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire error body. Rejections carry only `message`; authorization and
/// internal failures also carry `status: "error"`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, status_field) = match &self {
            ApiError::StaleClient => (
                StatusCode::BAD_REQUEST,
                "Please update your app".to_string(),
                None,
            ),
            ApiError::InvalidToken => (
                StatusCode::BAD_REQUEST,
                "Invalid or expired token".to_string(),
                None,
            ),
            ApiError::UnknownIdentity => (
                StatusCode::BAD_REQUEST,
                "Student is not registered".to_string(),
                None,
            ),
            ApiError::NoActiveClass => (
                StatusCode::BAD_REQUEST,
                "No class active for attendance".to_string(),
                None,
            ),
            ApiError::OutsideWindow { window } => (
                StatusCode::BAD_REQUEST,
                format!("You can mark attendance between {}", window),
                None,
            ),
            ApiError::ImpreciseLocation => (
                StatusCode::BAD_REQUEST,
                "Location reading is too imprecise, try again".to_string(),
                None,
            ),
            ApiError::OutsideGeofence => (
                StatusCode::BAD_REQUEST,
                "Move a little inside classroom and mark again".to_string(),
                None,
            ),
            ApiError::DomainNotAllowed(suffixes) => (
                StatusCode::BAD_REQUEST,
                format!("mail should end with {}", suffixes),
                None,
            ),
            ApiError::DeviceConflict => (
                StatusCode::BAD_REQUEST,
                "you can log in on only one device".to_string(),
                Some("error"),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not authorized to access this page".to_string(),
                Some("error"),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    Some("error"),
                )
            }
        };

        let body = ErrorBody {
            message,
            status: status_field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // Unique violation on students.device_token: the
                        // token is already bound elsewhere.
                        "23505" => ApiError::DeviceConflict,
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(_: JwtError) -> Self {
        ApiError::InvalidToken
    }
}

impl From<GeofenceError> for ApiError {
    fn from(err: GeofenceError) -> Self {
        match err {
            GeofenceError::ImpreciseLocation { .. } => ApiError::ImpreciseLocation,
            GeofenceError::NegativeAccuracy => {
                ApiError::Validation("Accuracy must be non-negative".into())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(_, errors)| {
                errors
                    .iter()
                    .map(|e| e.message.clone().map(|m| m.to_string()).unwrap_or_default())
            })
            .collect();

        let message = if messages.len() == 1 {
            messages[0].clone()
        } else {
            format!("{} validation errors", messages.len())
        };

        ApiError::Validation(message)
    }
}
