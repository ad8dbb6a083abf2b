//! Response bodies for the HTTP API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use price_proxy_core::{AssetHealth, HealthReport, HealthState, PriceView};
use serde::Serialize;

/// One entry of the `/api/prices` map.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PriceEntry {
    #[serde(rename_all = "camelCase")]
    Priced {
        price: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        market_cap: Option<f64>,
        last_updated: Option<DateTime<Utc>>,
    },
    #[serde(rename_all = "camelCase")]
    Missing {
        error: String,
        last_updated: Option<DateTime<Utc>>,
    },
}

impl From<PriceView> for PriceEntry {
    fn from(view: PriceView) -> Self {
        match view {
            PriceView::Priced {
                price,
                market_cap,
                last_updated,
            } => Self::Priced {
                price,
                market_cap,
                last_updated,
            },
            PriceView::Missing {
                error,
                last_updated,
            } => Self::Missing {
                error,
                last_updated,
            },
        }
    }
}

pub type PriceMap = BTreeMap<String, PriceEntry>;

#[derive(Debug, Serialize)]
pub struct PricesResponse {
    pub prices: PriceMap,
    pub partial: bool,
    pub timestamp: DateTime<Utc>,
}

/// 503 body when no asset has a price yet.
#[derive(Debug, Serialize)]
pub struct NoPricesResponse {
    pub error: String,
    pub prices: PriceMap,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub id: String,
    pub symbol: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUnavailableResponse {
    pub error: String,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthState,
    pub shutdown_in_progress: bool,
    pub cryptocurrencies: Vec<AssetHealth>,
}

impl HealthResponse {
    pub fn new(report: HealthReport, shutdown_in_progress: bool) -> Self {
        Self {
            status: report.status,
            shutdown_in_progress,
            cryptocurrencies: report.assets,
        }
    }
}
