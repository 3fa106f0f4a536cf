use serde::{Deserialize, Serialize};

/// Stock level for a single named item, as owned by the stock manager.
///
/// The storefront only ever holds transient copies of this record; it is
/// mutated exclusively through the stock store's `set` operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub item_name: String,
    pub item_count: i64,
}

impl ItemRecord {
    pub fn new(item_name: impl Into<String>, item_count: i64) -> Self {
        Self {
            item_name: item_name.into(),
            item_count,
        }
    }
}

/// Inbound request to withhold `requested_count` units of `requested_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub requested_item: String,
    pub requested_count: i64,
}

impl ReservationRequest {
    pub fn new(requested_item: impl Into<String>, requested_count: i64) -> Self {
        Self {
            requested_item: requested_item.into(),
            requested_count,
        }
    }
}

impl core::fmt::Display for ReservationRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ReservationRequest(requestedItem={}, requestedCount={})",
            self.requested_item, self.requested_count
        )
    }
}
