//! Call envelope: a fixed deadline around stock manager calls.
//!
//! A deadline is fixed when the envelope is started and shared by every call
//! made under it, so a reservation's lookup and update together never outlive
//! the configured timeout. A single attempt is made per call; there is no retry.
//! Callers turn a [`DependencyFailure`] into their terminal fallback response.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::stock_store::StoreError;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Dependency name reported when the stock manager cannot be reached.
pub const STOCK_MANAGER: &str = "stock manager";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEnvelope {
    timeout: Duration,
}

impl CallEnvelope {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a deadline measured from now.
    pub fn start(&self, dependency: &'static str) -> Deadline {
        Deadline {
            dependency,
            timeout: self.timeout,
            expires_at: Instant::now() + self.timeout,
        }
    }
}

impl Default for CallEnvelope {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_TIMEOUT)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    dependency: &'static str,
    timeout: Duration,
    expires_at: Instant,
}

impl Deadline {
    /// Run one store call, failing if it errors or the deadline passes first.
    pub async fn call<T, F>(&self, call: &'static str, fut: F) -> Result<T, DependencyFailure>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout_at(self.expires_at, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(self.failure(call, FailureCause::Store(err))),
            Err(_elapsed) => Err(self.failure(call, FailureCause::TimedOut(self.timeout))),
        }
    }

    fn failure(&self, call: &'static str, cause: FailureCause) -> DependencyFailure {
        tracing::warn!(dependency = self.dependency, call, cause = ?cause, "dependency call failed");
        DependencyFailure {
            dependency: self.dependency,
            call,
            cause,
        }
    }
}

/// A store call made under an envelope did not produce a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{call} against {dependency} failed: {cause}")]
pub struct DependencyFailure {
    pub dependency: &'static str,
    pub call: &'static str,
    pub cause: FailureCause,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FailureCause {
    #[error("no response within {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Store(StoreError),
}

impl FailureCause {
    pub fn name(&self) -> &'static str {
        match self {
            FailureCause::TimedOut(_) => "TimedOut",
            FailureCause::Store(err) => err.kind_name(),
        }
    }

    /// Caller-safe description: the cause name plus the upstream status or
    /// timeout, never upstream bodies, URLs or transport text.
    pub fn summary(&self) -> String {
        match self {
            FailureCause::TimedOut(timeout) => format!("no response within {timeout:?}"),
            FailureCause::Store(StoreError::UpstreamStatus { status, .. }) => {
                format!("{} (status {status})", self.name())
            }
            FailureCause::Store(err) => err.kind_name().to_string(),
        }
    }

    /// Timeouts and transport/upstream failures; everything else is unclassified.
    pub fn is_dependency_failure(&self) -> bool {
        match self {
            FailureCause::TimedOut(_) => true,
            FailureCause::Store(err) => err.is_dependency_failure(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_successful_calls() {
        let deadline = CallEnvelope::default().start(STOCK_MANAGER);
        let got = deadline.call("getAllStockLevels", async { Ok::<_, StoreError>(42) }).await;
        assert_eq!(got, Ok(42));
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let deadline = CallEnvelope::new(Duration::from_millis(20)).start(STOCK_MANAGER);
        let got = deadline
            .call("getAllStockLevels", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, StoreError>(())
            })
            .await;

        let failure = got.unwrap_err();
        assert_eq!(failure.dependency, STOCK_MANAGER);
        assert_eq!(failure.call, "getAllStockLevels");
        assert_eq!(failure.cause, FailureCause::TimedOut(Duration::from_millis(20)));
        assert!(failure.cause.is_dependency_failure());
    }

    #[tokio::test]
    async fn deadline_is_shared_across_calls() {
        let deadline = CallEnvelope::new(Duration::from_millis(60)).start(STOCK_MANAGER);

        let first = deadline
            .call("getStockItem", async {
                tokio::time::sleep(Duration::from_millis(40)).await;
                Ok::<_, StoreError>(())
            })
            .await;
        assert!(first.is_ok());

        // 40ms of budget are already spent; another 40ms overruns it.
        let second = deadline
            .call("setStockItemLevel", async {
                tokio::time::sleep(Duration::from_millis(40)).await;
                Ok::<_, StoreError>(())
            })
            .await;
        assert!(matches!(
            second.map_err(|f| f.cause),
            Err(FailureCause::TimedOut(_))
        ));
    }

    #[tokio::test]
    async fn store_errors_are_wrapped_with_call_name() {
        let deadline = CallEnvelope::default().start(STOCK_MANAGER);
        let got = deadline
            .call("getStockItem", async {
                Err::<(), _>(StoreError::Decode("bad".into()))
            })
            .await;
        let failure = got.unwrap_err();
        assert_eq!(failure.call, "getStockItem");
        assert_eq!(failure.cause.name(), "StoreError::Decode");
        assert!(!failure.cause.is_dependency_failure());
    }

    #[test]
    fn summary_omits_upstream_text() {
        let upstream = FailureCause::Store(StoreError::UpstreamStatus {
            status: 500,
            body: "jdbc:postgres://db?password=hunter2".into(),
        });
        assert_eq!(upstream.summary(), "StoreError::UpstreamStatus (status 500)");
        assert!(!upstream.to_string().contains("hunter2"));

        let unreachable = FailureCause::Store(StoreError::Unreachable(
            "error sending request for url (http://stock.internal:8081/stocklevel)".into(),
        ));
        assert_eq!(unreachable.summary(), "StoreError::Unreachable");

        let timed_out = FailureCause::TimedOut(Duration::from_millis(50));
        assert_eq!(timed_out.summary(), "no response within 50ms");
    }
}
