//! CoinGecko provider for crypto spot prices.
//!
//! Uses the batched `/simple/price` endpoint: one request carries every
//! tracked asset id and returns `{id: {currency: price}}`. Works against both
//! the public API and the Pro API (pass an API key and point the base URL at
//! `https://pro-api.coingecko.com/api/v3`).

mod models;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{PriceBatch, QuoteRequest};
use crate::provider::PriceProvider;

use self::models::{extract_error_message, parse_quote};

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

/// Public API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-cg-api-key";

/// Default HTTP request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// CoinGecko price provider.
///
/// # Example
///
/// ```ignore
/// use price_proxy_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new(Some("your_api_key".to_string()));
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Create a provider for the public API, with an optional API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: build_client(REQUEST_TIMEOUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Point the provider at a different base URL (Pro API, proxies, test stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Turn a non-success response into the matching error.
    async fn error_from_response(response: reqwest::Response) -> MarketDataError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
                message,
            };
        }

        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            status: status.as_u16(),
            message: message.unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            }),
        }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_prices(
        &self,
        request: &QuoteRequest,
    ) -> Result<PriceBatch, MarketDataError> {
        let url = format!("{}/simple/price", self.base_url);
        let vs_currency = request.vs_currency.as_ref();

        let mut query: Vec<(&str, String)> = vec![
            ("ids", request.joined_ids()),
            ("vs_currencies", vs_currency.to_string()),
        ];
        if request.include_market_cap {
            query.push(("include_market_cap", "true".to_string()));
        }

        let mut builder = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&query);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        debug!(
            "CoinGecko request: {} ids in {}",
            request.ids.len(),
            vs_currency
        );

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        if !response.status().is_success() {
            let error = Self::error_from_response(response).await;
            warn!("CoinGecko request failed: {}", error);
            return Err(error);
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse response: {}", e),
                }
            }
        })?;

        let entries = body
            .as_object()
            .ok_or_else(|| MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: "Expected a JSON object keyed by asset id".to_string(),
            })?;

        let mut batch = PriceBatch::new(PROVIDER_ID, Utc::now());
        for id in &request.ids {
            if let Some(entry) = entries.get(id) {
                batch.insert(id.clone(), parse_quote(entry, vs_currency));
            }
        }

        Ok(batch)
    }
}
