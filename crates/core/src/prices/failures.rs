//! Per-asset failure accounting.

use log::{error, warn};

use super::cache::PriceCache;
use crate::constants::FAILURE_ALERT_THRESHOLD;
use crate::errors::Result;

/// Result of recording one failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub asset_id: String,
    pub consecutive_failures: u32,
    /// True only for the attempt that reached the alert threshold
    pub alert_raised: bool,
}

/// Counts consecutive failures and raises an alert when the threshold is hit.
#[derive(Debug, Clone, Copy)]
pub struct FailurePolicy {
    alert_threshold: u32,
}

impl FailurePolicy {
    pub fn new(alert_threshold: u32) -> Self {
        Self { alert_threshold }
    }

    /// Record a failed attempt for `asset_id`.
    ///
    /// Price and last-updated time are left untouched. The alert fires once
    /// per streak, on the attempt whose count equals the threshold.
    pub fn record(
        &self,
        cache: &PriceCache,
        asset_id: &str,
        message: &str,
    ) -> Result<FailureRecord> {
        let entry = cache.update(asset_id, |current| current.with_failure(message))?;
        let consecutive_failures = entry.consecutive_failures;
        let alert_raised = consecutive_failures == self.alert_threshold;

        warn!(
            "Failed to update {} ({} consecutive): {}",
            asset_id, consecutive_failures, message
        );
        if alert_raised {
            error!(
                "ALERT: {} has failed {} consecutive updates, last error: {}",
                asset_id, consecutive_failures, message
            );
        }

        Ok(FailureRecord {
            asset_id: asset_id.to_string(),
            consecutive_failures,
            alert_raised,
        })
    }
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::new(FAILURE_ALERT_THRESHOLD)
    }
}
