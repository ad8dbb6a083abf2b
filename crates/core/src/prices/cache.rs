//! In-memory price cache shared by the refresh task and the HTTP handlers.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;

use super::model::CacheEntry;
use crate::assets::SymbolRegistry;
use crate::errors::{Error, Result};

/// Thread-safe map of asset id to [`CacheEntry`].
///
/// The key set is fixed at construction: one entry per tracked asset, never
/// added to or removed afterwards. The lock is held for a single map
/// operation only, so readers always see whole entries and never wait on a
/// network call.
#[derive(Debug)]
pub struct PriceCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl PriceCache {
    /// Create a cache with an empty entry for each id.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = ids
            .into_iter()
            .map(|id| (id.into(), CacheEntry::empty()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Create a cache with an empty entry for every registered asset.
    pub fn from_registry(registry: &SymbolRegistry) -> Self {
        Self::new(registry.api_ids())
    }

    /// Lock for reading, recovering from poison if necessary.
    ///
    /// Entries are replaced whole, so a poisoned map still holds only
    /// complete values.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!("Price cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!("Price cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Copy of the entry for `id`.
    pub fn get(&self, id: &str) -> Option<CacheEntry> {
        self.read_entries().get(id).cloned()
    }

    /// Atomically replace the entry for a tracked id.
    pub fn put(&self, id: &str, entry: CacheEntry) -> Result<()> {
        let mut entries = self.write_entries();
        match entries.get_mut(id) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(Error::UnknownAsset(id.to_string())),
        }
    }

    /// Atomically compute a new entry from the current one and store it.
    ///
    /// Returns the stored value.
    pub fn update<F>(&self, id: &str, f: F) -> Result<CacheEntry>
    where
        F: FnOnce(&CacheEntry) -> CacheEntry,
    {
        let mut entries = self.write_entries();
        let slot = entries
            .get_mut(id)
            .ok_or_else(|| Error::UnknownAsset(id.to_string()))?;
        let next = f(slot);
        *slot = next.clone();
        Ok(next)
    }

    /// Copy of every entry.
    pub fn snapshot(&self) -> HashMap<String, CacheEntry> {
        self.read_entries().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read_entries().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetMapping, SymbolRegistry};
    use chrono::Utc;
    use std::sync::Arc;

    fn registry() -> SymbolRegistry {
        SymbolRegistry::new(vec![
            AssetMapping::new("quai-network", "QUAI", "Quai Network"),
            AssetMapping::new("bitcoin", "BTC", "Bitcoin"),
        ])
        .unwrap()
    }

    #[test]
    fn test_every_registered_asset_starts_empty() {
        let cache = PriceCache::from_registry(&registry());
        assert_eq!(cache.len(), 2);
        for id in ["quai-network", "bitcoin"] {
            let entry = cache.get(id).unwrap();
            assert!(entry.price.is_none());
            assert_eq!(entry.consecutive_failures, 0);
        }
    }

    #[test]
    fn test_put_replaces_entry() {
        let cache = PriceCache::from_registry(&registry());
        let entry = CacheEntry::fresh(1.23, None, Utc::now());
        cache.put("bitcoin", entry.clone()).unwrap();
        assert_eq!(cache.get("bitcoin"), Some(entry));
    }

    #[test]
    fn test_put_never_adds_entries() {
        let cache = PriceCache::from_registry(&registry());
        let result = cache.put("dogecoin", CacheEntry::empty());
        assert!(matches!(result, Err(Error::UnknownAsset(id)) if id == "dogecoin"));
        assert!(!cache.contains("dogecoin"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_update_returns_stored_value() {
        let cache = PriceCache::from_registry(&registry());
        let stored = cache
            .update("quai-network", |e| e.with_failure("boom"))
            .unwrap();
        assert_eq!(stored.consecutive_failures, 1);
        assert_eq!(cache.get("quai-network"), Some(stored));
        assert!(cache.update("nope", |e| e.clone()).is_err());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let cache = PriceCache::from_registry(&registry());
        let before = cache.snapshot();
        cache
            .put("bitcoin", CacheEntry::fresh(2.0, None, Utc::now()))
            .unwrap();
        assert!(before["bitcoin"].price.is_none());
        assert_eq!(cache.snapshot()["bitcoin"].price, Some(2.0));
    }

    #[test]
    fn test_concurrent_writers_do_not_lose_updates() {
        let cache = Arc::new(PriceCache::from_registry(&registry()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        cache
                            .update("quai-network", |e| e.with_failure("boom"))
                            .unwrap();
                        let _ = cache.get("bitcoin");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.get("quai-network").unwrap().consecutive_failures, 800);
    }
}
