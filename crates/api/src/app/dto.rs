use axum::http::StatusCode;
use serde::Serialize;

use storefront_core::SettingError;

use crate::app::errors;

// -------------------------
// Response DTOs
// -------------------------

/// Body of `GET /status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub name: String,
    pub alive: bool,
    pub version: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Body of the liveness/readiness probes.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    pub name: &'static str,
    pub status: HealthStatus,
    pub data: serde_json::Value,
}

// -------------------------
// Request body helpers
// -------------------------

/// Parse the raw `POST /minimumChange` body: a bare integer, with or without JSON framing.
pub fn parse_minimum_change(body: &str) -> Result<i64, axum::response::Response> {
    let raw = body.trim();
    serde_json::from_str::<i64>(raw).map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_minimum_change",
            format!("Minimum change ({raw}) must be > 0 and an integer"),
        )
    })
}

pub fn setting_error_to_response(err: SettingError) -> axum::response::Response {
    match err {
        SettingError::InvalidArgument(_) => {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_minimum_change", err.to_string())
        }
    }
}
