use axum::{routing::get, Router};

pub mod configuration;
pub mod store;
pub mod system;

/// Router for every storefront endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/store", store::router())
        .route(
            "/minimumChange",
            get(configuration::get_minimum_change).post(configuration::set_minimum_change),
        )
        .route("/status", get(system::status))
        .route("/health", get(system::health))
        .route("/health/live", get(system::live))
        .route("/health/ready", get(system::ready))
}
