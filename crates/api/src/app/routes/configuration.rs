use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};
use tracing::info;

use crate::app::dto;
use crate::app::services::AppServices;

/// Current threshold as plain text.
pub async fn get_minimum_change(Extension(services): Extension<Arc<AppServices>>) -> String {
    services.minimum_change().get().to_string()
}

pub async fn set_minimum_change(
    Extension(services): Extension<Arc<AppServices>>,
    body: String,
) -> axum::response::Response {
    let requested = match dto::parse_minimum_change(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.minimum_change().set(requested) {
        Ok(applied) => {
            info!(minimum_change = applied, "minimum change updated");
            Json(applied).into_response()
        }
        Err(e) => dto::setting_error_to_response(e),
    }
}
