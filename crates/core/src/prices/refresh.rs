//! One refresh cycle: a single batched upstream call applied to every
//! tracked asset.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info, warn};
use price_proxy_market_data::{MarketDataError, PriceBatch, PriceProvider, QuoteRequest, RetryClass};

use super::cache::PriceCache;
use super::failures::FailurePolicy;
use super::model::CacheEntry;
use super::validation::validate_quote;
use crate::assets::SymbolRegistry;
use crate::constants::{
    FAILURE_ALERT_THRESHOLD, INVALID_PRICE_MESSAGE, QUOTE_CURRENCY, RATE_LIMIT_BACKOFF,
    REFRESH_INTERVAL,
};
use crate::lifecycle::ShutdownToken;

/// Tunables for the refresh loop.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Period between regular cycles
    pub interval: Duration,
    /// Pause after an HTTP 429
    pub rate_limit_backoff: Duration,
    /// Quote currency sent upstream
    pub vs_currency: String,
    /// Also fetch and validate market capitalisation
    pub track_market_cap: bool,
    pub failure_alert_threshold: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: REFRESH_INTERVAL,
            rate_limit_backoff: RATE_LIMIT_BACKOFF,
            vs_currency: QUOTE_CURRENCY.to_string(),
            track_market_cap: false,
            failure_alert_threshold: FAILURE_ALERT_THRESHOLD,
        }
    }
}

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Shutdown was in progress; nothing was fetched or written.
    Skipped,
    /// The provider answered. Counts are per tracked asset.
    Completed { updated: usize, invalid: usize },
    /// The request itself failed; every tracked asset recorded the failure.
    Failed { retry: RetryClass, reason: String },
}

impl RefreshOutcome {
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::Failed {
                retry: RetryClass::Backoff,
                ..
            }
        )
    }
}

/// Fetches prices for all tracked assets and writes them into the cache.
pub struct RefreshEngine {
    provider: Arc<dyn PriceProvider>,
    cache: Arc<PriceCache>,
    registry: Arc<SymbolRegistry>,
    config: RefreshConfig,
    shutdown: ShutdownToken,
    failures: FailurePolicy,
}

impl RefreshEngine {
    pub fn new(
        provider: Arc<dyn PriceProvider>,
        cache: Arc<PriceCache>,
        registry: Arc<SymbolRegistry>,
        config: RefreshConfig,
        shutdown: ShutdownToken,
    ) -> Self {
        let failures = FailurePolicy::new(config.failure_alert_threshold);
        Self {
            provider,
            cache,
            registry,
            config,
            shutdown,
            failures,
        }
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    fn request(&self) -> QuoteRequest {
        QuoteRequest::new(self.registry.api_ids(), self.config.vs_currency.clone())
            .with_market_cap(self.config.track_market_cap)
    }

    /// Run one cycle.
    ///
    /// Never returns an error: request and per-asset failures are recorded
    /// in the cache and summarised in the outcome.
    pub async fn refresh_once(&self) -> RefreshOutcome {
        if self.shutdown.is_triggered() {
            debug!("Shutdown in progress, skipping price refresh");
            return RefreshOutcome::Skipped;
        }

        let request = self.request();
        debug!(
            "Fetching {} prices from {} for: {}",
            self.config.vs_currency,
            self.provider.id(),
            request.joined_ids()
        );

        match self.provider.get_latest_prices(&request).await {
            Ok(batch) => self.apply_batch(&batch),
            Err(error) => self.apply_failure(&error),
        }
    }

    /// Write a successful response into the cache, one asset at a time.
    pub fn apply_batch(&self, batch: &PriceBatch) -> RefreshOutcome {
        let now = Utc::now();
        let mut updated = 0;
        let mut invalid = 0;

        for asset in self.registry.assets() {
            let id = asset.api_id.as_str();
            match validate_quote(batch.get(id), self.config.track_market_cap) {
                Some(quote) => {
                    let entry = CacheEntry::fresh(quote.price, quote.market_cap, now);
                    match self.cache.put(id, entry) {
                        Ok(()) => {
                            updated += 1;
                            info!("Updated {} price: ${}", asset.symbol, quote.price);
                        }
                        Err(e) => warn!("Could not store price for {}: {}", id, e),
                    }
                }
                None => {
                    invalid += 1;
                    if let Err(e) = self.failures.record(&self.cache, id, INVALID_PRICE_MESSAGE) {
                        warn!("Could not record failure for {}: {}", id, e);
                    }
                }
            }
        }

        RefreshOutcome::Completed { updated, invalid }
    }

    /// Record a request-level failure against every tracked asset.
    pub fn apply_failure(&self, error: &MarketDataError) -> RefreshOutcome {
        let reason = error.reason();
        error!("Error fetching prices from {}: {}", self.provider.id(), error);

        if error.is_rate_limited() {
            warn!("Rate limit hit, consider upgrading to CoinGecko Pro");
        }

        for id in self.registry.api_ids() {
            if let Err(e) = self.failures.record(&self.cache, &id, &reason) {
                warn!("Could not record failure for {}: {}", id, e);
            }
        }

        RefreshOutcome::Failed {
            retry: error.retry_class(),
            reason,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted provider shared by the refresh and scheduler tests.

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use price_proxy_market_data::{MarketDataError, PriceBatch, PriceProvider, QuoteRequest, RawQuote};

    pub enum Scripted {
        Prices(Vec<(&'static str, Option<f64>, Option<f64>)>),
        RateLimited,
        Timeout,
        Upstream(u16, &'static str),
    }

    /// Provider that replays a queue of responses, repeating the last one.
    pub struct ScriptedProvider {
        script: Mutex<VecDeque<Scripted>>,
        last: Mutex<Option<Vec<(&'static str, Option<f64>, Option<f64>)>>>,
        calls: AtomicUsize,
        requests: Mutex<Vec<QuoteRequest>>,
    }

    impl ScriptedProvider {
        pub fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                last: Mutex::new(None),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<QuoteRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PriceProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn get_latest_prices(
            &self,
            request: &QuoteRequest,
        ) -> Result<PriceBatch, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());

            let next = self.script.lock().unwrap().pop_front();
            let quotes = match next {
                Some(Scripted::Prices(quotes)) => {
                    *self.last.lock().unwrap() = Some(quotes.clone());
                    quotes
                }
                Some(Scripted::RateLimited) => {
                    return Err(MarketDataError::RateLimited {
                        provider: "SCRIPTED".to_string(),
                        message: None,
                    })
                }
                Some(Scripted::Timeout) => {
                    return Err(MarketDataError::Timeout {
                        provider: "SCRIPTED".to_string(),
                    })
                }
                Some(Scripted::Upstream(status, message)) => {
                    return Err(MarketDataError::ProviderError {
                        provider: "SCRIPTED".to_string(),
                        status,
                        message: message.to_string(),
                    })
                }
                None => self.last.lock().unwrap().clone().unwrap_or_default(),
            };

            let mut batch = PriceBatch::new("SCRIPTED", Utc::now());
            for (id, price, market_cap) in quotes {
                batch.insert(id, RawQuote { price, market_cap });
            }
            Ok(batch)
        }
    }
}
