//! Price Proxy Core - price cache, refresh loop and health evaluation.
//!
//! This crate owns the in-memory price cache and everything that writes to
//! or reads from it. It is HTTP-agnostic: upstream access goes through the
//! `PriceProvider` trait from `price-proxy-market-data`, and the server crate
//! turns the read projections into responses.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod lifecycle;
pub mod prices;

pub use assets::*;
pub use lifecycle::ShutdownToken;
pub use prices::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
