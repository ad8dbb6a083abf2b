use std::time::Duration;

/// Quote currency requested from the upstream provider
pub const QUOTE_CURRENCY: &str = "usd";

/// Period between regular refresh cycles
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// How long the periodic trigger stays suspended after an HTTP 429
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(60);

/// Consecutive failures after which an asset raises an alert
pub const FAILURE_ALERT_THRESHOLD: u32 = 5;

/// An entry older than this is considered stale by the health check
pub const STALENESS_WINDOW_SECS: i64 = 60;

/// Recorded when the provider answered but an asset's value was unusable
pub const INVALID_PRICE_MESSAGE: &str = "Invalid price data received";

/// Shown for assets that have never had a price
pub const PRICE_UNAVAILABLE_MESSAGE: &str = "Price data not available";
