use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use storefront_core::ReservationRequest;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/stocklevel", get(list_stock))
        .route("/reserveStock", post(reserve_stock))
}

pub async fn list_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.reservations().list_stock().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::failed_dependency(&e),
    }
}

pub async fn reserve_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<ReservationRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(rejection.status(), "invalid_request", rejection.body_text());
        }
    };

    info!(%request, "reserve stock");
    match services.reservations().reserve(&request).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(failure) => errors::failure_to_response(&failure, &ctx),
    }
}
