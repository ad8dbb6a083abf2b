use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use price_proxy_market_data::provider::coingecko::DEFAULT_BASE_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Optional CoinGecko API key, sent as `x-cg-api-key`
    pub api_key: Option<String>,
    pub upstream_base_url: String,
    pub track_market_cap: bool,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port: u16 = var_or("PORT", "3000")
            .trim()
            .parse()
            .context("Invalid PORT")?;
        let listen_addr = SocketAddr::from(([0, 0, 0, 0], port));

        let api_key = lookup("COINGECKO_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let upstream_base_url = lookup("COINGECKO_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let track_market_cap = matches!(
            var_or("PRICE_PROXY_TRACK_MARKET_CAP", "false")
                .trim()
                .to_ascii_lowercase()
                .as_str(),
            "1" | "true" | "yes" | "on"
        );

        let cors_allow = var_or("PRICE_PROXY_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var_or("PRICE_PROXY_REQUEST_TIMEOUT_MS", "30000")
            .trim()
            .parse()
            .context("Invalid PRICE_PROXY_REQUEST_TIMEOUT_MS")?;
        let log_format = var_or("PRICE_PROXY_LOG_FORMAT", "text");

        Ok(Self {
            listen_addr,
            api_key,
            upstream_base_url,
            track_market_cap,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            api_key: None,
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            track_market_cap: false,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            log_format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 3000);
        assert!(config.api_key.is_none());
        assert_eq!(config.upstream_base_url, DEFAULT_BASE_URL);
        assert!(!config.track_market_cap);
        assert_eq!(config.cors_allow, vec!["*"]);
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn test_values_read_from_source() {
        let config = config(&[
            ("PORT", "8080"),
            ("COINGECKO_API_KEY", "  key  "),
            ("COINGECKO_BASE_URL", "http://localhost:9999/"),
            ("PRICE_PROXY_TRACK_MARKET_CAP", "Yes"),
            ("PRICE_PROXY_CORS_ALLOW_ORIGINS", "https://a.example, https://b.example"),
            ("PRICE_PROXY_REQUEST_TIMEOUT_MS", "1500"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.upstream_base_url, "http://localhost:9999");
        assert!(config.track_market_cap);
        assert_eq!(config.cors_allow, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config(&[("PORT", "not-a-port")]).err().unwrap();
        assert_eq!(err.to_string(), "Invalid PORT");
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        let err = config(&[("PRICE_PROXY_REQUEST_TIMEOUT_MS", "soon")]).err().unwrap();
        assert_eq!(err.to_string(), "Invalid PRICE_PROXY_REQUEST_TIMEOUT_MS");
    }
}
