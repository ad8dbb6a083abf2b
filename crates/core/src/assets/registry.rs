use std::collections::HashMap;

use log::error;
use serde::Serialize;

use crate::errors::{Error, Result};

/// Static mapping between an upstream asset id and its display symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMapping {
    /// Identifier used by the upstream API and as the cache key
    pub api_id: String,
    /// Ticker shown to clients
    pub symbol: String,
    pub name: String,
}

impl AssetMapping {
    pub fn new(
        api_id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            api_id: api_id.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Assets tracked out of the box: (api id, symbol, name).
pub const DEFAULT_ASSETS: &[(&str, &str, &str)] = &[("quai-network", "QUAI", "Quai Network")];

fn default_mappings() -> Vec<AssetMapping> {
    DEFAULT_ASSETS
        .iter()
        .map(|(api_id, symbol, name)| AssetMapping::new(*api_id, *symbol, *name))
        .collect()
}

/// Read-only registry of tracked assets.
///
/// Storage is keyed by api id; external lookups may use either the symbol
/// (case-insensitive) or the api id.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    assets: Vec<AssetMapping>,
    by_symbol: HashMap<String, usize>,
    by_api_id: HashMap<String, usize>,
}

impl SymbolRegistry {
    /// Build a registry, rejecting duplicate ids or symbols.
    pub fn new(assets: Vec<AssetMapping>) -> Result<Self> {
        let mut by_symbol = HashMap::with_capacity(assets.len());
        let mut by_api_id = HashMap::with_capacity(assets.len());

        for (index, asset) in assets.iter().enumerate() {
            if by_api_id.insert(asset.api_id.clone(), index).is_some() {
                return Err(Error::DuplicateAsset(asset.api_id.clone()));
            }
            if by_symbol
                .insert(asset.symbol.to_lowercase(), index)
                .is_some()
            {
                return Err(Error::DuplicateAsset(asset.symbol.clone()));
            }
        }

        Ok(Self {
            assets,
            by_symbol,
            by_api_id,
        })
    }

    /// Registry populated from [`DEFAULT_ASSETS`].
    ///
    /// The table goes through the same duplicate checks as [`Self::new`];
    /// a table that fails them yields an empty registry.
    pub fn with_defaults() -> Self {
        Self::new(default_mappings()).unwrap_or_else(|e| {
            error!("Default asset table rejected: {}", e);
            Self {
                assets: Vec::new(),
                by_symbol: HashMap::new(),
                by_api_id: HashMap::new(),
            }
        })
    }

    /// Tracked assets in registration order.
    pub fn assets(&self) -> &[AssetMapping] {
        &self.assets
    }

    /// Api ids in registration order, as sent upstream.
    pub fn api_ids(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.api_id.clone()).collect()
    }

    pub fn get(&self, api_id: &str) -> Option<&AssetMapping> {
        self.by_api_id.get(api_id).map(|&i| &self.assets[i])
    }

    pub fn contains(&self, api_id: &str) -> bool {
        self.by_api_id.contains_key(api_id)
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Option<&AssetMapping> {
        self.by_symbol
            .get(&symbol.to_lowercase())
            .map(|&i| &self.assets[i])
    }

    pub fn symbol_for(&self, api_id: &str) -> Option<&str> {
        self.get(api_id).map(|a| a.symbol.as_str())
    }

    /// Resolve a client-supplied key: symbol first, then api id.
    pub fn resolve(&self, key: &str) -> Option<&AssetMapping> {
        self.find_by_symbol(key).or_else(|| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
