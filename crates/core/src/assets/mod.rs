//! Tracked asset registry.
//!
//! The registry is static for the lifetime of the process: it decides which
//! ids are fetched upstream and which cache entries exist.

mod registry;

pub use registry::{AssetMapping, SymbolRegistry, DEFAULT_ASSETS};
