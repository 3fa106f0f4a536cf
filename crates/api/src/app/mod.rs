//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stock store selection and the reservation service
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and body parsing helpers
//! - `errors.rs`: failure classification into wire responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use storefront_infra::StorefrontConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub fn build_app(config: &StorefrontConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config)?;
    Ok(build_app_with_services(services))
}

/// Build the router around already-wired services (tests inject their own stores here).
pub fn build_app_with_services(services: AppServices) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_context))
            .layer(Extension(Arc::new(services))),
    )
}
