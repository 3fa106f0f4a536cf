use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::app::dto::{HealthCheckResponse, HealthStatus, StatusResponse};
use crate::app::services::AppServices;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub async fn status(Extension(services): Extension<Arc<AppServices>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        name: services.store_name().to_string(),
        alive: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
    })
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn live(Extension(services): Extension<Arc<AppServices>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        name: "storefront-live",
        status: HealthStatus::Up,
        data: json!({
            "storename": services.store_name(),
            "uptimeSeconds": services.uptime().as_secs(),
        }),
    })
}

/// Ready only while the stock manager answers its status probe.
pub async fn ready(
    Extension(services): Extension<Arc<AppServices>>,
) -> (StatusCode, Json<HealthCheckResponse>) {
    match services.reservations().check_ready().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthCheckResponse {
                name: "storefront-ready",
                status: HealthStatus::Up,
                data: json!({ "stockmanager": "reachable" }),
            }),
        ),
        Err(e) => {
            warn!(cause = ?e.cause, call = e.call, "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthCheckResponse {
                    name: "storefront-ready",
                    status: HealthStatus::Down,
                    data: json!({
                        "stockmanager": "unreachable",
                        "reason": e.cause.summary(),
                    }),
                }),
            )
        }
    }
}
