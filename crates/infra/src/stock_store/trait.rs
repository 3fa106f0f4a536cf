use std::sync::Arc;

use thiserror::Error;

use storefront_core::ItemRecord;

/// Stock store operation error.
///
/// These are **infrastructure errors** reported by (or on the way to) the stock
/// manager, as opposed to reservation validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection refused, unknown host, or another transport-level failure.
    #[error("stock manager unreachable: {0}")]
    Unreachable(String),

    /// The stock manager answered with a non-success status.
    ///
    /// `body` is kept for logs only and never rendered.
    #[error("stock manager responded with status {status}")]
    UpstreamStatus { status: u16, body: String },

    /// The response did not have the expected shape.
    #[error("malformed stock manager response: {0}")]
    Decode(String),

    /// The store refused a write.
    #[error("stock manager rejected the update: {0}")]
    Rejected(String),

    #[error("stock store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Short name used as the cause in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StoreError::Unreachable(_) => "StoreError::Unreachable",
            StoreError::UpstreamStatus { .. } => "StoreError::UpstreamStatus",
            StoreError::Decode(_) => "StoreError::Decode",
            StoreError::Rejected(_) => "StoreError::Rejected",
            StoreError::Backend(_) => "StoreError::Backend",
        }
    }

    /// Whether the failure means the dependency itself is unavailable.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Unreachable(_) | StoreError::UpstreamStatus { .. }
        )
    }
}

/// Authoritative stock levels, keyed by item name.
///
/// The storefront never locks across `get` and `set`; atomicity of a
/// read-then-write is the store's own business.
#[async_trait::async_trait]
pub trait StockStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<ItemRecord>, StoreError>;

    /// `Ok(None)` when the item is not known.
    async fn get(&self, item_name: &str) -> Result<Option<ItemRecord>, StoreError>;

    /// Set the level for an item, returning the record as the store now holds it.
    async fn set(&self, item_name: &str, item_count: i64) -> Result<ItemRecord, StoreError>;

    /// Readiness probe.
    async fn check_ready(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<ItemRecord>, StoreError> {
        (**self).get_all().await
    }

    async fn get(&self, item_name: &str) -> Result<Option<ItemRecord>, StoreError> {
        (**self).get(item_name).await
    }

    async fn set(&self, item_name: &str, item_count: i64) -> Result<ItemRecord, StoreError> {
        (**self).set(item_name, item_count).await
    }

    async fn check_ready(&self) -> Result<(), StoreError> {
        (**self).check_ready().await
    }
}
