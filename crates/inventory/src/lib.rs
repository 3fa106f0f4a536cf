//! Inventory reservation rules.
//!
//! This crate contains business rules for stock reservation, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod minimum_change;
pub mod reservation;

pub use minimum_change::{DEFAULT_MINIMUM_CHANGE, MinimumChange};
pub use reservation::{check_minimum_change, check_stock, validate};
