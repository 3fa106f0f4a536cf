//! Failure classification: every reservation outcome maps to one status + body.
//!
//! | failure                | status |
//! |------------------------|--------|
//! | below minimum change   | 406    |
//! | unknown item           | 404    |
//! | insufficient stock     | 409    |
//! | upstream unavailable   | 424    |
//! | anything else          | 500    |

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};

use storefront_core::FailureKind;
use storefront_infra::DependencyFailure;

use crate::context::RequestContext;

pub fn failure_status(failure: &FailureKind) -> StatusCode {
    match failure {
        FailureKind::BelowMinimumChange { .. } => StatusCode::NOT_ACCEPTABLE,
        FailureKind::UnknownItem { .. } => StatusCode::NOT_FOUND,
        FailureKind::InsufficientStock { .. } => StatusCode::CONFLICT,
        FailureKind::UpstreamUnavailable { .. } => StatusCode::FAILED_DEPENDENCY,
        // Unclassified, and any kind without a wire mapping.
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn failure_to_response(failure: &FailureKind, ctx: &RequestContext) -> axum::response::Response {
    let mut body = json!({
        "error": failure.code(),
        "message": failure.to_string(),
    });

    let details = match failure {
        FailureKind::BelowMinimumChange {
            item,
            requested,
            minimum,
        } => json!({
            "requestedItem": item,
            "requestedCount": requested,
            "minimumChange": minimum,
        }),
        FailureKind::UnknownItem { item, requested } => json!({
            "requestedItem": item,
            "requestedCount": requested,
        }),
        FailureKind::InsufficientStock {
            item,
            requested,
            available,
        } => json!({
            "requestedItem": item,
            "requestedCount": requested,
            "availableCount": available,
        }),
        FailureKind::UpstreamUnavailable {
            dependency, call, ..
        } => json!({
            "dependency": dependency,
            "call": call,
        }),
        FailureKind::Unclassified(context) => json!({
            "operation": context.operation,
            "arguments": context.arguments,
            "cause": context.cause,
            "causeMessage": context.message,
            "requestId": ctx.request_id(),
        }),
        _ => json!({ "requestId": ctx.request_id() }),
    };
    merge(&mut body, details);

    (failure_status(failure), axum::Json(body)).into_response()
}

/// Terminal fallback for a failed stock manager read: always 424.
pub fn failed_dependency(failure: &DependencyFailure) -> axum::response::Response {
    (
        StatusCode::FAILED_DEPENDENCY,
        axum::Json(json!({
            "error": "failed_dependency",
            "message": format!("Unable to connect to the {} service", failure.dependency),
            "dependency": failure.dependency,
            "call": failure.call,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn merge(target: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
        target.extend(extra);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::to_bytes;

    use storefront_core::FailureContext;
    use storefront_infra::{FailureCause, STOCK_MANAGER};

    use super::*;

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ctx() -> RequestContext {
        RequestContext::new("req-1")
    }

    #[tokio::test]
    async fn below_minimum_is_not_acceptable() {
        let failure = FailureKind::BelowMinimumChange {
            item: "Pencil".into(),
            requested: 2,
            minimum: 3,
        };
        let resp = failure_to_response(&failure, &ctx());
        assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "below_minimum_change");
        assert_eq!(body["requestedCount"], 2);
        assert_eq!(body["minimumChange"], 3);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let failure = FailureKind::UnknownItem {
            item: "Stapler".into(),
            requested: 5,
        };
        let resp = failure_to_response(&failure, &ctx());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["requestedItem"], "Stapler");
    }

    #[tokio::test]
    async fn insufficient_stock_is_conflict() {
        let failure = FailureKind::InsufficientStock {
            item: "Pencil".into(),
            requested: 5,
            available: 5,
        };
        let resp = failure_to_response(&failure, &ctx());
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["requestedCount"], 5);
        assert_eq!(body["availableCount"], 5);
    }

    #[tokio::test]
    async fn upstream_unavailable_is_failed_dependency() {
        let failure = FailureKind::UpstreamUnavailable {
            dependency: STOCK_MANAGER.into(),
            call: "getStockItem".into(),
            reason: "no response within 15s".into(),
        };
        let resp = failure_to_response(&failure, &ctx());
        assert_eq!(resp.status().as_u16(), 424);
        assert_eq!(body_json(resp).await["call"], "getStockItem");
    }

    #[tokio::test]
    async fn unclassified_is_internal_error_with_context() {
        let context = FailureContext::new("reserve(ReservationRequest)", vec!["arg".into()])
            .with_cause("StoreError::Decode", "bad json");
        let resp = failure_to_response(&FailureKind::Unclassified(context), &ctx());
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["operation"], "reserve(ReservationRequest)");
        assert_eq!(body["arguments"], json!(["arg"]));
        assert_eq!(body["cause"], "StoreError::Decode");
        assert_eq!(body["requestId"], "req-1");
    }

    #[tokio::test]
    async fn listing_fallback_names_the_dependency() {
        let failure = DependencyFailure {
            dependency: STOCK_MANAGER,
            call: "getAllStockLevels",
            cause: FailureCause::TimedOut(Duration::from_secs(15)),
        };
        let resp = failed_dependency(&failure);
        assert_eq!(resp.status().as_u16(), 424);
        let body = body_json(resp).await;
        assert_eq!(body["dependency"], STOCK_MANAGER);
        assert_eq!(
            body["message"],
            "Unable to connect to the stock manager service"
        );
    }
}
