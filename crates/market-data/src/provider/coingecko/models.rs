//! CoinGecko API response models.

use serde::Deserialize;
use serde_json::Value;

use crate::models::RawQuote;

/// Error body CoinGecko sends with 4xx/5xx responses.
///
/// Two shapes are seen in the wild: a flat `{"error": "..."}` and the
/// rate-limit shape `{"status": {"error_code": 429, "error_message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<ErrorStatus>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorStatus {
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorResponse {
    /// Best available message from the body, if any.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.status.and_then(|s| s.error_message))
            .filter(|m| !m.trim().is_empty())
    }
}

/// Parse an error body, returning the upstream message when present.
pub(super) fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
}

/// Pull one asset's quote out of a `/simple/price` entry.
///
/// An entry looks like `{"usd": 0.0512, "usd_market_cap": 12345.6}`.
/// Anything that is not a JSON number is treated as missing.
pub(super) fn parse_quote(entry: &Value, vs_currency: &str) -> RawQuote {
    let market_cap_key = format!("{}_market_cap", vs_currency);
    RawQuote {
        price: entry.get(vs_currency).and_then(Value::as_f64),
        market_cap: entry.get(&market_cap_key).and_then(Value::as_f64),
    }
}
