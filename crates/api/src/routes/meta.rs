//! Connectivity and app version endpoints.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::AppState;

/// App version response; the mobile client compares `version` against its
/// own and offers the download link when behind.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub apk_url: String,
}

/// Connectivity probe used by the mobile app.
pub async fn ping() -> Json<Value> {
    Json(json!({"message": "pong"}))
}

/// Latest published app version and download URL.
pub async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.config.attendance.latest_app_version.clone(),
        apk_url: state.config.attendance.apk_url.clone(),
    })
}
