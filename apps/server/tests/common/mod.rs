#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use price_proxy_core::{AssetMapping, SymbolRegistry};
use price_proxy_market_data::{MarketDataError, PriceBatch, PriceProvider, QuoteRequest, RawQuote};
use price_proxy_server::{api::app_router, build_state_with_provider, config::Config, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Provider returning a fixed set of prices.
pub struct FixedProvider(pub Vec<(&'static str, f64)>);

#[async_trait]
impl PriceProvider for FixedProvider {
    fn id(&self) -> &'static str {
        "FIXED"
    }

    async fn get_latest_prices(
        &self,
        _request: &QuoteRequest,
    ) -> Result<PriceBatch, MarketDataError> {
        let mut batch = PriceBatch::new("FIXED", Utc::now());
        for (id, price) in &self.0 {
            batch.insert(*id, RawQuote {
                price: Some(*price),
                market_cap: None,
            });
        }
        Ok(batch)
    }
}

/// Provider that always times out.
pub struct DownProvider;

#[async_trait]
impl PriceProvider for DownProvider {
    fn id(&self) -> &'static str {
        "DOWN"
    }

    async fn get_latest_prices(
        &self,
        _request: &QuoteRequest,
    ) -> Result<PriceBatch, MarketDataError> {
        Err(MarketDataError::Timeout {
            provider: "DOWN".to_string(),
        })
    }
}

pub fn registry() -> SymbolRegistry {
    SymbolRegistry::new(vec![
        AssetMapping::new("quai-network", "QUAI", "Quai Network"),
        AssetMapping::new("bitcoin", "BTC", "Bitcoin"),
    ])
    .unwrap()
}

pub fn setup(provider: Arc<dyn PriceProvider>) -> (Router, Arc<AppState>) {
    let config = Config::default();
    let state = build_state_with_provider(&config, registry(), provider).unwrap();
    (app_router(state.clone(), &config), state)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
