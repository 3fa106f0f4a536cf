//! Reservation orchestration: validation sequenced against the stock store.
//!
//! ```text
//! ReservationRequest
//!   ↓
//! 1. Read the current minimum change; reject small requests (no store access)
//!   ↓
//! 2. Look the item up (under the call envelope); reject unknown items
//!   ↓
//! 3. Check stock sufficiency against the fetched record
//!   ↓
//! 4. Set the new level (under the same deadline) and return the store's record
//! ```
//!
//! Exactly one mutating store call happens per successful reservation and none
//! on any failure path. Steps 2 and 4 are a check-then-act without a lock:
//! concurrent reservations of the same item can race, and atomicity of the
//! read-then-write is left to the store. A timeout while step 4 is in flight
//! leaves the outcome unknown; callers must re-query before retrying.

use std::sync::Arc;

use tracing::{error, info, warn};

use storefront_core::{FailureContext, FailureKind, ItemRecord, ReservationRequest};
use storefront_inventory::{check_minimum_change, validate, MinimumChange};

use crate::envelope::{CallEnvelope, DependencyFailure, STOCK_MANAGER};
use crate::stock_store::StockStore;

const RESERVE_OPERATION: &str = "ReservationService.reserve(ReservationRequest)";

#[derive(Debug)]
pub struct ReservationService<S> {
    store: S,
    minimum_change: Arc<MinimumChange>,
    envelope: CallEnvelope,
}

impl<S> ReservationService<S> {
    pub fn new(store: S, minimum_change: Arc<MinimumChange>, envelope: CallEnvelope) -> Self {
        Self {
            store,
            minimum_change,
            envelope,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn minimum_change(&self) -> &Arc<MinimumChange> {
        &self.minimum_change
    }

    pub fn envelope(&self) -> CallEnvelope {
        self.envelope
    }
}

impl<S> ReservationService<S>
where
    S: StockStore,
{
    /// Withhold `requested_count` units of `requested_item` from stock.
    pub async fn reserve(&self, request: &ReservationRequest) -> Result<ItemRecord, FailureKind> {
        info!(
            item = %request.requested_item,
            requested = request.requested_count,
            "Requesting the reservation of {} items of {}",
            request.requested_count,
            request.requested_item
        );

        let minimum = self.minimum_change.get();
        check_minimum_change(request, minimum).map_err(log_rejection)?;

        let deadline = self.envelope.start(STOCK_MANAGER);
        let current = deadline
            .call("getStockItem", self.store.get(&request.requested_item))
            .await
            .map_err(|f| classify(request, f))
            .map_err(log_rejection)?;

        if let Some(current) = &current {
            info!(
                item = %current.item_name,
                available = current.item_count,
                "stock item {} exists and currently there are {} items in stock",
                current.item_name,
                current.item_count
            );
        }

        // The threshold was already checked against the same `minimum` snapshot.
        let planned = validate(request, minimum, current.as_ref()).map_err(log_rejection)?;

        info!(
            item = %request.requested_item,
            planned,
            "The reservation of {} items of {} is being sent to the stock manager",
            request.requested_count,
            request.requested_item
        );
        let updated = deadline
            .call(
                "setStockItemLevel",
                self.store.set(&request.requested_item, planned),
            )
            .await
            .map_err(|f| {
                warn!(
                    item = %request.requested_item,
                    "stock update outcome unknown; the write may have been applied"
                );
                classify(request, f)
            })
            .map_err(log_rejection)?;

        info!(
            item = %updated.item_name,
            remaining = updated.item_count,
            "The reservation of {} items of {} succeeded, the stock manager reports {} remain",
            request.requested_count,
            request.requested_item,
            updated.item_count
        );
        Ok(updated)
    }

    /// List every stock level under the call envelope.
    pub async fn list_stock(&self) -> Result<Vec<ItemRecord>, DependencyFailure> {
        let items = self
            .envelope
            .start(STOCK_MANAGER)
            .call("getAllStockLevels", self.store.get_all())
            .await?;
        info!(count = items.len(), "Found {} items", items.len());
        Ok(items)
    }

    /// Probe the stock store under the call envelope.
    pub async fn check_ready(&self) -> Result<(), DependencyFailure> {
        self.envelope
            .start(STOCK_MANAGER)
            .call("status", self.store.check_ready())
            .await
    }
}

/// Map an envelope failure raised while reserving onto the failure taxonomy.
fn classify(request: &ReservationRequest, failure: DependencyFailure) -> FailureKind {
    if failure.cause.is_dependency_failure() {
        return FailureKind::UpstreamUnavailable {
            dependency: failure.dependency.to_string(),
            call: failure.call.to_string(),
            reason: failure.cause.summary(),
        };
    }
    let context = FailureContext::new(RESERVE_OPERATION, vec![request.to_string()]).with_cause(
        failure.cause.name(),
        format!("{}: {}", failure.call, failure.cause.summary()),
    );
    FailureKind::Unclassified(context)
}

fn log_rejection(failure: FailureKind) -> FailureKind {
    error!(code = failure.code(), "{failure}");
    failure
}
