//! Runtime settings, layered from defaults, an optional `coinboard.toml`
//! and `COINBOARD_*` environment variables.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root directory of the file-backed key-value store.
    pub data_dir: String,
    /// Base URL of the market-data provider.
    pub market_api_base: String,
    /// Base URL of the external account service.
    pub account_api_base: String,
    /// Freshness window of the market listing cache, in seconds.
    pub cache_ttl_secs: i64,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("data_dir", "./data")?
            .set_default("market_api_base", "https://api.coingecko.com/api/v3")?
            .set_default("account_api_base", "http://localhost:5000")?
            .set_default("cache_ttl_secs", cb_market::DEFAULT_TTL_SECS)?
            .add_source(config::File::with_name("coinboard").required(false))
            .add_source(config::Environment::with_prefix("COINBOARD"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
