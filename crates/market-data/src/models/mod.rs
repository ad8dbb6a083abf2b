//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (ProviderId, Currency, AssetId)
//! - `quote` - Batched quote request and response structures (QuoteRequest, PriceBatch, RawQuote)

mod quote;
mod types;

pub use quote::{PriceBatch, QuoteRequest, RawQuote};
pub use types::{AssetId, Currency, ProviderId};
