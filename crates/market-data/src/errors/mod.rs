//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for upstream price fetches
//! - [`RetryClass`]: Classification for determining how the refresh loop reacts

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching prices from an upstream provider.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method. The text recorded against cache
/// entries comes from [`reason`](Self::reason), which prefers the message the
/// provider itself sent back.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
        /// Error message from the response body, if any
        message: Option<String>,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success status.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// HTTP status code
        status: u16,
        /// The error message from the provider, or a status description
        message: String,
    },

    /// The provider answered 2xx but the body could not be decoded.
    #[error("Invalid response: {provider} - {message}")]
    InvalidResponse {
        /// The provider that sent the body
        provider: String,
        /// Decoder error
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use price_proxy_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "COINGECKO".to_string(), message: None };
    /// assert_eq!(error.retry_class(), RetryClass::Backoff);
    ///
    /// let error = MarketDataError::Timeout { provider: "COINGECKO".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::NextCycle);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } => RetryClass::Backoff,
            Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::InvalidResponse { .. }
            | Self::Network(_) => RetryClass::NextCycle,
        }
    }

    /// Returns true for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Human-readable reason suitable for storing on a cache entry.
    ///
    /// Upstream-provided messages win over transport descriptions.
    pub fn reason(&self) -> String {
        match self {
            Self::RateLimited {
                message: Some(message),
                ..
            } => message.clone(),
            Self::RateLimited { message: None, .. } => {
                "Request failed with status code 429".to_string()
            }
            Self::Timeout { .. } => "Request timed out".to_string(),
            Self::ProviderError { message, .. } => message.clone(),
            Self::InvalidResponse { message, .. } => message.clone(),
            Self::Network(e) => e.to_string(),
        }
    }
}
