//! Configuration loading and representation.
//!
//! Values come from environment variables; anything unset falls back to a
//! default, anything malformed is a [`ConfigError`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use storefront_inventory::DEFAULT_MINIMUM_CHANGE;

use crate::envelope::DEFAULT_CALL_TIMEOUT;

pub const BIND_ADDR_VAR: &str = "STOREFRONT_BIND_ADDR";
pub const STORE_NAME_VAR: &str = "STOREFRONT_STORE_NAME";
pub const MINIMUM_CHANGE_VAR: &str = "STOREFRONT_MINIMUM_CHANGE";
pub const REQUEST_TIMEOUT_VAR: &str = "STOREFRONT_REQUEST_TIMEOUT_MS";
pub const STOCK_MANAGER_URL_VAR: &str = "STOCKMANAGER_URL";
pub const STOCK_MANAGER_STATUS_URL_VAR: &str = "STOCKMANAGER_STATUS_URL";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_STORE_NAME: &str = "My Shop";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("STOREFRONT_MINIMUM_CHANGE must be > 0, got {0}")]
    NonPositiveMinimumChange(i64),

    #[error("STOREFRONT_REQUEST_TIMEOUT_MS must be > 0")]
    ZeroTimeout,
}

/// Where the remote stock manager lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockManagerConfig {
    pub base_url: Url,
    pub status_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub bind_addr: SocketAddr,
    pub store_name: String,
    pub minimum_change: i64,
    pub request_timeout: Duration,
    /// `None` runs against the in-memory demo stock.
    pub stock_manager: Option<StockManagerConfig>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            store_name: DEFAULT_STORE_NAME.to_string(),
            minimum_change: DEFAULT_MINIMUM_CHANGE,
            request_timeout: DEFAULT_CALL_TIMEOUT,
            stock_manager: None,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (blank values count as unset).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = match get(BIND_ADDR_VAR) {
            Some(raw) => parse(BIND_ADDR_VAR, &raw, "socket address")?,
            None => DEFAULT_BIND_ADDR,
        };

        let store_name = get(STORE_NAME_VAR).unwrap_or_else(|| DEFAULT_STORE_NAME.to_string());

        let minimum_change = match get(MINIMUM_CHANGE_VAR) {
            Some(raw) => parse(MINIMUM_CHANGE_VAR, &raw, "integer")?,
            None => DEFAULT_MINIMUM_CHANGE,
        };
        if minimum_change <= 0 {
            return Err(ConfigError::NonPositiveMinimumChange(minimum_change));
        }

        let request_timeout = match get(REQUEST_TIMEOUT_VAR) {
            Some(raw) => Duration::from_millis(parse(REQUEST_TIMEOUT_VAR, &raw, "millisecond count")?),
            None => DEFAULT_CALL_TIMEOUT,
        };
        if request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        let stock_manager = match get(STOCK_MANAGER_URL_VAR) {
            Some(raw) => {
                let base_url = parse_http_url(STOCK_MANAGER_URL_VAR, &raw)?;
                let status_url = match get(STOCK_MANAGER_STATUS_URL_VAR) {
                    Some(raw) => parse_http_url(STOCK_MANAGER_STATUS_URL_VAR, &raw)?,
                    None => default_status_url(&base_url),
                };
                Some(StockManagerConfig {
                    base_url,
                    status_url,
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            store_name,
            minimum_change,
            request_timeout,
            stock_manager,
        })
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    raw: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        expected,
    })
}

fn parse_http_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::Invalid {
        var,
        value: raw.to_string(),
        expected: "http(s) URL",
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}

/// `/status` on the stock manager's origin.
fn default_status_url(base: &Url) -> Url {
    let mut url = base.clone();
    url.set_path("/status");
    url.set_query(None);
    url.set_fragment(None);
    url
}
