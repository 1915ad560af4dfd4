//! Read-only client for the external order service.
//!
//! The order service exposes `GET {base_url}/user/{userId}` returning a JSON
//! array of orders. An empty body or `null` means the user has no orders.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::OrderSummary;

pub const DEFAULT_ORDER_SERVICE_URL: &str = "http://order-service/api/orders";

#[derive(Debug, Error)]
pub enum OrderClientError {
    #[error("Order service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Order service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Order service response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of a user's orders
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderClient: Send + Sync {
    async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderSummary>, OrderClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderServiceConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl OrderServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OrderServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_SERVICE_URL)
    }
}

impl FromEnv for OrderServiceConfig {
    /// - ORDER_SERVICE_URL: defaults to http://order-service/api/orders
    /// - ORDER_SERVICE_TIMEOUT_SECS: defaults to 5
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("ORDER_SERVICE_URL", DEFAULT_ORDER_SERVICE_URL);
        let timeout_secs: u64 = env_parse("ORDER_SERVICE_TIMEOUT_SECS", "5")?;

        Ok(Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs)))
    }
}

/// [`OrderClient`] over HTTP. No retries; each call is a single attempt.
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    client: Client,
    base_url: String,
}

impl HttpOrderClient {
    pub fn new(config: OrderServiceConfig) -> Result<Self, OrderClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn orders_url(&self, user_id: Uuid) -> String {
        format!("{}/user/{}", self.base_url, user_id)
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderSummary>, OrderClientError> {
        let url = self.orders_url(user_id);
        tracing::debug!(%user_id, %url, "Fetching orders");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrderClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let orders: Option<Vec<OrderSummary>> = serde_json::from_slice(&body)?;
        Ok(orders.unwrap_or_default())
    }
}
