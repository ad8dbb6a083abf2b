//! Price cache, refresh loop and read projections.

mod cache;
mod failures;
mod health;
mod model;
mod projections;
mod refresh;
mod scheduler;
mod validation;

pub use cache::PriceCache;
pub use failures::{FailurePolicy, FailureRecord};
pub use health::{evaluate, is_entry_healthy, AssetHealth, HealthReport, HealthState};
pub use model::CacheEntry;
pub use projections::{project_all, project_one, PriceLookup, PriceView, PricesProjection};
pub use refresh::{RefreshConfig, RefreshEngine, RefreshOutcome};
pub use scheduler::{RefreshScheduler, SchedulerState};
pub use validation::{is_valid_amount, validate_quote, ValidQuote};
