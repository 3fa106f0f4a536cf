use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use storefront_core::SettingError;
use storefront_infra::{
    CallEnvelope, HttpStockStore, InMemoryStockStore, ReservationService, StockStore,
    StorefrontConfig,
};
use storefront_inventory::MinimumChange;

/// Stock store shared by every request (remote client or in-memory stand-in).
pub type SharedStockStore = Arc<dyn StockStore>;

pub struct AppServices {
    reservations: ReservationService<SharedStockStore>,
    store_name: String,
    started_at: Instant,
}

impl AppServices {
    pub fn new(
        store: SharedStockStore,
        minimum_change: Arc<MinimumChange>,
        envelope: CallEnvelope,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            reservations: ReservationService::new(store, minimum_change, envelope),
            store_name: store_name.into(),
            started_at: Instant::now(),
        }
    }

    pub fn reservations(&self) -> &ReservationService<SharedStockStore> {
        &self.reservations
    }

    pub fn minimum_change(&self) -> &MinimumChange {
        self.reservations.minimum_change()
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

pub fn build_services(config: &StorefrontConfig) -> Result<AppServices, SettingError> {
    let store: SharedStockStore = match &config.stock_manager {
        Some(sm) => {
            info!(
                base_url = %sm.base_url,
                status_url = %sm.status_url,
                "using remote stock manager"
            );
            Arc::new(HttpStockStore::new(
                sm.base_url.clone(),
                sm.status_url.clone(),
            ))
        }
        None => {
            warn!("STOCKMANAGER_URL not set; using in-memory demo stock");
            Arc::new(InMemoryStockStore::demo())
        }
    };

    let minimum_change = Arc::new(MinimumChange::new(config.minimum_change)?);
    info!(
        minimum_change = config.minimum_change,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "storefront {} ready to wire",
        config.store_name
    );

    Ok(AppServices::new(
        store,
        minimum_change,
        CallEnvelope::new(config.request_timeout),
        config.store_name.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_uses_demo_stock() {
        let services = build_services(&StorefrontConfig::default()).unwrap();
        assert_eq!(services.minimum_change().get(), 3);
        assert_eq!(services.store_name(), "My Shop");
        let items = services.reservations().list_stock().await.unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn rejects_non_positive_minimum_change() {
        let config = StorefrontConfig {
            minimum_change: 0,
            ..StorefrontConfig::default()
        };
        assert!(build_services(&config).is_err());
    }
}
