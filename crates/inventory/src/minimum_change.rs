use std::sync::atomic::{AtomicI64, Ordering};

use storefront_core::SettingError;

pub const DEFAULT_MINIMUM_CHANGE: i64 = 3;

/// Process-wide smallest count a single reservation may request.
///
/// Reads and writes are linearizable (a single atomic scalar). A write is not
/// ordered against reservations that have already passed their threshold check.
#[derive(Debug)]
pub struct MinimumChange {
    value: AtomicI64,
}

impl MinimumChange {
    pub fn new(initial: i64) -> Result<Self, SettingError> {
        ensure_positive(initial)?;
        Ok(Self {
            value: AtomicI64::new(initial),
        })
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Replace the threshold, returning the value now in effect.
    ///
    /// Non-positive values are rejected and leave the current value unchanged.
    pub fn set(&self, new_value: i64) -> Result<i64, SettingError> {
        ensure_positive(new_value)?;
        self.value.store(new_value, Ordering::SeqCst);
        Ok(new_value)
    }
}

impl Default for MinimumChange {
    fn default() -> Self {
        Self {
            value: AtomicI64::new(DEFAULT_MINIMUM_CHANGE),
        }
    }
}

fn ensure_positive(value: i64) -> Result<(), SettingError> {
    if value <= 0 {
        return Err(SettingError::InvalidArgument(value));
    }
    Ok(())
}
