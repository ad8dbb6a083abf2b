use std::sync::Arc;

use crate::config::Config;
use price_proxy_core::{
    PriceCache, RefreshConfig, RefreshEngine, ShutdownToken, SymbolRegistry,
};
use price_proxy_market_data::{CoinGeckoProvider, PriceProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub cache: Arc<PriceCache>,
    pub registry: Arc<SymbolRegistry>,
    pub engine: Arc<RefreshEngine>,
    pub shutdown: ShutdownToken,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wire the cache, registry and refresh engine against CoinGecko.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = CoinGeckoProvider::new(config.api_key.clone())
        .with_base_url(config.upstream_base_url.clone());
    tracing::info!(
        "Using CoinGecko at {} ({})",
        provider.base_url(),
        if provider.has_api_key() {
            "with API key"
        } else {
            "public tier"
        }
    );
    build_state_with_provider(config, SymbolRegistry::with_defaults(), Arc::new(provider))
}

/// Same as [`build_state`] with an explicit registry and provider.
pub fn build_state_with_provider(
    config: &Config,
    registry: SymbolRegistry,
    provider: Arc<dyn PriceProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let registry = Arc::new(registry);
    let cache = Arc::new(PriceCache::from_registry(&registry));
    let shutdown = ShutdownToken::new();

    let refresh_config = RefreshConfig {
        track_market_cap: config.track_market_cap,
        ..RefreshConfig::default()
    };
    let engine = Arc::new(RefreshEngine::new(
        provider,
        cache.clone(),
        registry.clone(),
        refresh_config,
        shutdown.clone(),
    ));

    tracing::info!(
        "Tracking {} asset(s): {}",
        registry.len(),
        registry.api_ids().join(", ")
    );

    Ok(Arc::new(AppState {
        cache,
        registry,
        engine,
        shutdown,
    }))
}
