//! HTTP client for the remote stock manager service.
//!
//! REST contract:
//! - `GET {base}` lists every item
//! - `GET {base}/{name}` fetches one item (404, 204 or an empty body mean "absent")
//! - `POST {base}/{name}/{count}` sets the level and returns the updated item
//! - `GET {status}` answers when the service is up

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use storefront_core::ItemRecord;

use super::r#trait::{StockStore, StoreError};

#[derive(Debug, Clone)]
pub struct HttpStockStore {
    client: Client,
    base_url: Url,
    status_url: Url,
}

impl HttpStockStore {
    pub fn new(base_url: Url, status_url: Url) -> Self {
        Self::with_client(Client::new(), base_url, status_url)
    }

    pub fn with_client(client: Client, base_url: Url, status_url: Url) -> Self {
        Self {
            client,
            base_url,
            status_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_with(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Backend(format!("{} cannot carry item paths", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else if err.is_builder() {
        StoreError::Backend(err.to_string())
    } else {
        StoreError::Unreachable(err.to_string())
    }
}

async fn ensure_success(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::UpstreamStatus {
        status: status.as_u16(),
        body,
    })
}

/// Decode an optional JSON body; blank and `null` bodies are absent.
async fn optional_json<T: DeserializeOwned>(resp: Response) -> Result<Option<T>, StoreError> {
    let body = resp.text().await.map_err(transport_error)?;
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl StockStore for HttpStockStore {
    async fn get_all(&self) -> Result<Vec<ItemRecord>, StoreError> {
        let resp = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(transport_error)?;
        let resp = ensure_success(resp).await?;
        resp.json::<Vec<ItemRecord>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn get(&self, item_name: &str) -> Result<Option<ItemRecord>, StoreError> {
        let url = self.url_with(&[item_name])?;
        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        if matches!(resp.status(), StatusCode::NOT_FOUND | StatusCode::NO_CONTENT) {
            return Ok(None);
        }
        let resp = ensure_success(resp).await?;
        optional_json(resp).await
    }

    async fn set(&self, item_name: &str, item_count: i64) -> Result<ItemRecord, StoreError> {
        let count = item_count.to_string();
        let url = self.url_with(&[item_name, &count])?;
        let resp = self.client.post(url).send().await.map_err(transport_error)?;
        let resp = ensure_success(resp).await?;
        optional_json(resp)
            .await?
            .ok_or_else(|| StoreError::Rejected(format!("no record returned for {item_name}")))
    }

    async fn check_ready(&self) -> Result<(), StoreError> {
        let resp = self
            .client
            .get(self.status_url.clone())
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(resp).await.map(|_| ())
    }
}
