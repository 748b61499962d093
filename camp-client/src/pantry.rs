//! Remote basket client
//!
//! The basket is an opaque JSON document store: `GET` returns the last
//! document (404 = never written), `POST` replaces it.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// HTTP client for a JSON basket service
#[derive(Debug, Clone)]
pub struct BasketClient {
    client: Client,
    base_url: String,
}

impl BasketClient {
    /// Create a basket client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config
            .basket_url
            .clone()
            .ok_or_else(|| ClientError::NotConfigured("basket_url".to_string()))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn basket_url(&self, basket: &str) -> String {
        format!("{}/basket/{}", self.base_url.trim_end_matches('/'), basket)
    }

    /// Fetch a basket. `Ok(None)` when it has never been written.
    pub async fn fetch(&self, basket: &str) -> ClientResult<Option<Value>> {
        let response = self
            .client
            .get(self.basket_url(basket))
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(basket = %basket, "Basket not found, caller should initialize defaults");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().await?;
        Ok(Some(value))
    }

    /// Replace a basket's content
    pub async fn store(&self, basket: &str, document: &Value) -> ClientResult<()> {
        let response = self
            .client
            .post(self.basket_url(basket))
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
