//! Infrastructure layer: stock manager adapters, call envelope, reservation
//! orchestration, and configuration.

pub mod config;
pub mod envelope;
pub mod reservation;
pub mod stock_store;

pub use config::{ConfigError, StockManagerConfig, StorefrontConfig};
pub use envelope::{CallEnvelope, Deadline, DependencyFailure, FailureCause, STOCK_MANAGER};
pub use reservation::ReservationService;
pub use stock_store::{HttpStockStore, InMemoryStockStore, StockStore, StoreError};
