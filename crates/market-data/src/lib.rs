//! Price Proxy Market Data Crate
//!
//! This crate fetches the latest crypto prices from upstream providers for
//! the price proxy.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Batched latest-price requests (one call per refresh cycle)
//! - Optional market capitalisation alongside the price
//! - Error classification so the caller knows when to back off
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Refresh engine  | --> |   QuoteRequest   |  (ids + quote currency)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  PriceProvider   |  (CoinGecko)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    PriceBatch    |  (raw quotes per id)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`QuoteRequest`] - The batched request
//! - [`PriceBatch`] - Raw per-asset values returned by a provider
//! - [`RawQuote`] - Unvalidated price and market cap for one asset
//! - [`MarketDataError`] - Fetch failures, classified by [`RetryClass`]

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{AssetId, Currency, PriceBatch, ProviderId, QuoteRequest, RawQuote};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::PriceProvider;
