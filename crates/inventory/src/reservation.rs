//! Reservation validator: pure accept/reject decisions.
//!
//! The checks short-circuit in a fixed order: unknown item, below minimum
//! change, insufficient stock. A reservation that would leave exactly zero
//! items is rejected as insufficient stock.

use storefront_core::{FailureKind, ItemRecord, ReservationRequest};

/// Reject requests smaller than the current minimum change.
///
/// A request exactly equal to the minimum is accepted.
pub fn check_minimum_change(request: &ReservationRequest, minimum: i64) -> Result<(), FailureKind> {
    if request.requested_count < minimum {
        return Err(FailureKind::BelowMinimumChange {
            item: request.requested_item.clone(),
            requested: request.requested_count,
            minimum,
        });
    }
    Ok(())
}

/// Check the request against the current stock record, returning the planned new count.
pub fn check_stock(request: &ReservationRequest, current: &ItemRecord) -> Result<i64, FailureKind> {
    // Zero remaining stock counts as a failure, hence `<=`.
    if current.item_count <= request.requested_count {
        return Err(FailureKind::InsufficientStock {
            item: request.requested_item.clone(),
            requested: request.requested_count,
            available: current.item_count,
        });
    }
    Ok(current.item_count - request.requested_count)
}

/// Full decision for a request given the current threshold and stock record
/// (`None` when the store does not know the item).
///
/// Callers that must avoid a store round trip for undersized requests run
/// [`check_minimum_change`] first and then this with the same `minimum`.
pub fn validate(
    request: &ReservationRequest,
    minimum: i64,
    current: Option<&ItemRecord>,
) -> Result<i64, FailureKind> {
    let Some(current) = current else {
        return Err(FailureKind::UnknownItem {
            item: request.requested_item.clone(),
            requested: request.requested_count,
        });
    };
    check_minimum_change(request, minimum)?;
    check_stock(request, current)
}
