//! Core error types for the price proxy.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for cache and registry operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Duplicate asset in registry: {0}")]
    DuplicateAsset(String),
}
