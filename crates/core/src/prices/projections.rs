//! Read-side views of the cache served by the HTTP layer.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use super::model::CacheEntry;
use crate::assets::{AssetMapping, SymbolRegistry};
use crate::constants::PRICE_UNAVAILABLE_MESSAGE;

/// Projection of one cache entry.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceView {
    Priced {
        price: f64,
        market_cap: Option<f64>,
        last_updated: Option<DateTime<Utc>>,
    },
    Missing {
        error: String,
        last_updated: Option<DateTime<Utc>>,
    },
}

impl PriceView {
    pub fn from_entry(entry: &CacheEntry) -> Self {
        match entry.price {
            Some(price) => Self::Priced {
                price,
                market_cap: entry.market_cap,
                last_updated: entry.last_updated,
            },
            None => Self::Missing {
                error: entry
                    .last_error
                    .clone()
                    .unwrap_or_else(|| PRICE_UNAVAILABLE_MESSAGE.to_string()),
                last_updated: entry.last_updated,
            },
        }
    }

    pub fn has_price(&self) -> bool {
        matches!(self, Self::Priced { .. })
    }
}

/// All tracked assets, keyed by asset id.
#[derive(Debug, Clone, PartialEq)]
pub struct PricesProjection {
    pub prices: BTreeMap<String, PriceView>,
    /// True if at least one asset has no price
    pub partial: bool,
}

impl PricesProjection {
    pub fn has_any_price(&self) -> bool {
        self.prices.values().any(PriceView::has_price)
    }
}

/// Project every registered asset.
pub fn project_all(
    registry: &SymbolRegistry,
    snapshot: &HashMap<String, CacheEntry>,
) -> PricesProjection {
    let prices: BTreeMap<String, PriceView> = registry
        .assets()
        .iter()
        .map(|asset| {
            let view = snapshot
                .get(&asset.api_id)
                .map(PriceView::from_entry)
                .unwrap_or_else(|| PriceView::from_entry(&CacheEntry::empty()));
            (asset.api_id.clone(), view)
        })
        .collect();

    let partial = prices.values().any(|view| !view.has_price());
    PricesProjection { prices, partial }
}

/// Result of looking up a single asset by symbol or id.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup {
    NotFound,
    Unavailable {
        asset: AssetMapping,
        error: String,
        last_updated: Option<DateTime<Utc>>,
    },
    Available {
        asset: AssetMapping,
        price: f64,
        market_cap: Option<f64>,
        last_updated: Option<DateTime<Utc>>,
    },
}

/// Project one asset. `key` is matched as a symbol first, then as an id.
pub fn project_one(
    registry: &SymbolRegistry,
    entry_for: impl FnOnce(&str) -> Option<CacheEntry>,
    key: &str,
) -> PriceLookup {
    let Some(asset) = registry.resolve(key) else {
        return PriceLookup::NotFound;
    };
    let entry = entry_for(&asset.api_id).unwrap_or_default();

    match PriceView::from_entry(&entry) {
        PriceView::Priced {
            price,
            market_cap,
            last_updated,
        } => PriceLookup::Available {
            asset: asset.clone(),
            price,
            market_cap,
            last_updated,
        },
        PriceView::Missing {
            error,
            last_updated,
        } => PriceLookup::Unavailable {
            asset: asset.clone(),
            error,
            last_updated,
        },
    }
}
