use std::borrow::Cow;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Quote currency code as the provider spells it (e.g. "usd")
pub type Currency = Cow<'static, str>;

/// Provider-specific asset identifier (e.g. "quai-network")
pub type AssetId = String;
