//! Price cache domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cached state for one tracked asset.
///
/// Entries are immutable values: every write computes a complete new entry
/// and swaps it in. `last_updated` only ever moves on a successful refresh;
/// a failed refresh leaves `price` and `last_updated` as they were so the
/// last known-good value keeps being served.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Last valid price, absent until the first successful refresh
    pub price: Option<f64>,

    /// Last valid market cap (only when market-cap tracking is on)
    pub market_cap: Option<f64>,

    /// Time of the last successful update
    pub last_updated: Option<DateTime<Utc>>,

    /// Message from the most recent failed attempt, cleared on success
    pub last_error: Option<String>,

    /// Failed attempts since the last success
    pub consecutive_failures: u32,
}

impl CacheEntry {
    /// Initial state: nothing fetched yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Entry produced by a successful refresh.
    pub fn fresh(price: f64, market_cap: Option<f64>, at: DateTime<Utc>) -> Self {
        Self {
            price: Some(price),
            market_cap,
            last_updated: Some(at),
            last_error: None,
            consecutive_failures: 0,
        }
    }

    /// Next value after a failed attempt. Price and timestamp are kept.
    pub fn with_failure(&self, message: impl Into<String>) -> Self {
        Self {
            last_error: Some(message.into()),
            consecutive_failures: self.consecutive_failures.saturating_add(1),
            ..self.clone()
        }
    }

    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}
