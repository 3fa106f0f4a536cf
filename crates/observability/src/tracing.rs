//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: our logs at info, HTTP plumbing quieter.
pub const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(DEFAULT_FILTER);
}

/// Initialize with explicit fallback directives (still overridden by `RUST_LOG`).
pub fn init_with(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // JSON logs + timestamps, configurable via RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Span covering one inbound request; every log line inside carries the request id.
pub fn request_span(request_id: &str, method: &str, path: &str) -> ::tracing::Span {
    ::tracing::info_span!("request", request_id, method, path)
}
