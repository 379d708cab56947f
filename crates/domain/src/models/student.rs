//! Student domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered student.
///
/// `device_token` is bound on first registration and immutable afterwards;
/// one active device per student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub mail: String,
    pub name: Option<String>,
    pub device_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Display name, falling back to the mail local part.
    pub fn display_name(&self) -> &str {
        match self.name {
            Some(ref name) if !name.is_empty() => name,
            _ => self.mail.split('@').next().unwrap_or(&self.mail),
        }
    }
}

/// Request payload for student registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Identity token from the app's sign-in flow
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Response payload for a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub mail: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub status: String,
}
