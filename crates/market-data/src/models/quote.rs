use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{AssetId, Currency, ProviderId};

/// A single batched request for the latest quotes of several assets.
#[derive(Clone, Debug)]
pub struct QuoteRequest {
    /// Provider asset identifiers, sent together in one call
    pub ids: Vec<AssetId>,

    /// Quote currency (e.g. "usd")
    pub vs_currency: Currency,

    /// Whether the market capitalisation should be requested as well
    pub include_market_cap: bool,
}

impl QuoteRequest {
    /// Create a price-only request
    pub fn new(ids: Vec<AssetId>, vs_currency: impl Into<Currency>) -> Self {
        Self {
            ids,
            vs_currency: vs_currency.into(),
            include_market_cap: false,
        }
    }

    /// Toggle market-cap fetching
    pub fn with_market_cap(mut self, include_market_cap: bool) -> Self {
        self.include_market_cap = include_market_cap;
        self
    }

    /// Identifiers in the comma-joined form most batch endpoints expect
    pub fn joined_ids(&self) -> String {
        self.ids.join(",")
    }
}

/// Quoted values for one asset, exactly as the provider sent them.
///
/// Values that were missing or not numeric are `None`. No range checks are
/// applied here; deciding whether a value is usable is the caller's job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Price in the requested quote currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Market capitalisation in the requested quote currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

/// Result of one batched quote request.
#[derive(Clone, Debug)]
pub struct PriceBatch {
    quotes: HashMap<AssetId, RawQuote>,

    /// When the response was received
    pub fetched_at: DateTime<Utc>,

    /// Provider that produced the batch
    pub source: ProviderId,
}

impl PriceBatch {
    /// Create an empty batch
    pub fn new(source: impl Into<ProviderId>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            quotes: HashMap::new(),
            fetched_at,
            source: source.into(),
        }
    }

    /// Add or replace the quote for an asset
    pub fn insert(&mut self, id: impl Into<AssetId>, quote: RawQuote) {
        self.quotes.insert(id.into(), quote);
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with_quote(mut self, id: impl Into<AssetId>, quote: RawQuote) -> Self {
        self.insert(id, quote);
        self
    }

    /// Quote for an asset, if the provider returned one at all
    pub fn get(&self, id: &str) -> Option<&RawQuote> {
        self.quotes.get(id)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
