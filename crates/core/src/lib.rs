//! `storefront-core`: shared storefront domain types.
//!
//! This crate contains **pure domain** values (no infrastructure concerns):
//! the stock record exchanged with the stock manager, the inbound reservation
//! request, and the failure taxonomy every reservation outcome is expressed in.

pub mod error;
pub mod item;

pub use error::{FailureContext, FailureKind, SettingError};
pub use item::{ItemRecord, ReservationRequest};
