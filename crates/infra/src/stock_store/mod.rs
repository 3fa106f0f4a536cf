//! Stock manager collaborator: contract plus in-memory and HTTP adapters.

pub mod http;
pub mod in_memory;
pub mod r#trait;

pub use http::HttpStockStore;
pub use in_memory::InMemoryStockStore;
pub use r#trait::{StockStore, StoreError};
