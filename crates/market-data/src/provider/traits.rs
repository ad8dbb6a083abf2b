//! Price provider trait definitions.
//!
//! This module defines the core `PriceProvider` trait that all
//! upstream price sources must implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{PriceBatch, QuoteRequest};

/// Trait for upstream price providers.
///
/// Implement this trait to add support for a new price source. The refresh
/// engine only ever issues one batched request per cycle, so a provider
/// must answer for every requested identifier in a single call.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use price_proxy_market_data::provider::PriceProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl PriceProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_latest_prices(
///         &self,
///         request: &QuoteRequest,
///     ) -> Result<PriceBatch, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the latest quotes for every identifier in the request.
    ///
    /// # Returns
    ///
    /// A batch with whatever the provider returned. Identifiers the provider
    /// did not answer for are simply absent from the batch; request-level
    /// failures are reported as a `MarketDataError`.
    async fn get_latest_prices(
        &self,
        request: &QuoteRequest,
    ) -> Result<PriceBatch, MarketDataError>;
}
