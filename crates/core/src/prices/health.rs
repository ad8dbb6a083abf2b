//! Staleness-based health evaluation.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::model::CacheEntry;
use crate::assets::SymbolRegistry;
use crate::constants::STALENESS_WINDOW_SECS;

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
}

/// Health of one tracked asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHealth {
    pub id: String,
    pub symbol: String,
    pub healthy: bool,
    pub last_update: Option<DateTime<Utc>>,
    /// Failed attempts since the last success
    pub update_attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthState,
    pub assets: Vec<AssetHealth>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Healthy
    }
}

/// An entry is healthy when it has a price updated strictly within the
/// staleness window before `now`.
pub fn is_entry_healthy(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    let window = Duration::seconds(STALENESS_WINDOW_SECS);
    match (entry.price, entry.last_updated) {
        (Some(_), Some(updated)) => now - updated < window,
        _ => false,
    }
}

/// Evaluate every registered asset against a cache snapshot.
///
/// The service is healthy only if all assets are; an asset missing from the
/// snapshot counts as unhealthy.
pub fn evaluate(
    registry: &SymbolRegistry,
    snapshot: &HashMap<String, CacheEntry>,
    now: DateTime<Utc>,
) -> HealthReport {
    let assets: Vec<AssetHealth> = registry
        .assets()
        .iter()
        .map(|asset| {
            let entry = snapshot.get(&asset.api_id);
            AssetHealth {
                id: asset.api_id.clone(),
                symbol: asset.symbol.clone(),
                healthy: entry.is_some_and(|e| is_entry_healthy(e, now)),
                last_update: entry.and_then(|e| e.last_updated),
                update_attempts: entry.map_or(0, |e| e.consecutive_failures),
            }
        })
        .collect();

    let status = if assets.iter().all(|a| a.healthy) {
        HealthState::Healthy
    } else {
        HealthState::Degraded
    };

    HealthReport { status, assets }
}
