//! # cb-market
//!
//! TTL-cached access to the remote market-data provider.
//!
//! The cache is pull-based and lazy: a lookup either serves a fresh entry
//! synchronously or refreshes it inline. There is no background refresh and
//! no stale-while-revalidate; a failed refresh leaves any stale entry exactly
//! where it was, and stale data is never served as a fallback.

use cb_core::error::Result;
use cb_core::keys;
use cb_core::models::{CacheEntry, Candle, MarketAsset, PricePoint};
use cb_core::traits::MarketDataProvider;
use cb_store::TypedStore;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Default freshness window for the market listing.
pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

pub struct MarketCache {
    store: TypedStore,
    provider: Arc<dyn MarketDataProvider>,
    ttl: Duration,
}

impl MarketCache {
    pub fn new(store: TypedStore, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_ttl(store, provider, Duration::seconds(DEFAULT_TTL_SECS))
    }

    pub fn with_ttl(
        store: TypedStore,
        provider: Arc<dyn MarketDataProvider>,
        ttl: Duration,
    ) -> Self {
        Self { store, provider, ttl }
    }

    /// The market listing, from cache when fresh, otherwise refetched.
    ///
    /// A successful fetch overwrites the cache entry wholesale with
    /// `fetched_at = now`; a failed fetch propagates the error untouched.
    pub async fn markets(&self) -> Result<Vec<MarketAsset>> {
        let now = Utc::now();
        let cached: Option<CacheEntry<Vec<MarketAsset>>> =
            self.store.load(keys::MARKET_DATA_CACHE, None);

        if let Some(entry) = cached {
            if entry.is_fresh(self.ttl, now) {
                tracing::debug!(
                    age_secs = (now - entry.fetched_at).num_seconds(),
                    "serving market listing from cache"
                );
                return Ok(entry.value);
            }
        }

        let assets = self.provider.fetch_markets().await?;
        self.store
            .save(keys::MARKET_DATA_CACHE, &CacheEntry::new(assets.clone(), now));
        tracing::info!(count = assets.len(), "market listing refreshed");
        Ok(assets)
    }

    /// Historical price series; never cached (every chart range change in the
    /// original refetched).
    pub async fn history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        self.provider.fetch_history(asset_id, days).await
    }

    /// OHLC candlestick series; never cached.
    pub async fn ohlc(&self, asset_id: &str, days: u32) -> Result<Vec<Candle>> {
        self.provider.fetch_ohlc(asset_id, days).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cb_core::error::AppError;
    use cb_kv_memory::MemoryKvStore;
    use mockall::mock;

    mock! {
        Provider {}

        #[async_trait]
        impl MarketDataProvider for Provider {
            async fn fetch_markets(&self) -> Result<Vec<MarketAsset>>;
            async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>>;
            async fn fetch_ohlc(&self, asset_id: &str, days: u32) -> Result<Vec<Candle>>;
        }
    }

    fn asset(id: &str, price: f64) -> MarketAsset {
        MarketAsset {
            id: id.to_string(),
            name: id.to_string(),
            symbol: id[..3].to_string(),
            current_price: price,
            price_change_percentage_24h: 1.2,
            image: format!("https://img.example/{id}.png"),
        }
    }

    fn store() -> TypedStore {
        TypedStore::new(Arc::new(MemoryKvStore::new()))
    }

    fn seed_cache(store: &TypedStore, assets: Vec<MarketAsset>, age: Duration) {
        store.save(
            keys::MARKET_DATA_CACHE,
            &CacheEntry::new(assets, Utc::now() - age),
        );
    }

    #[tokio::test]
    async fn fresh_entry_skips_the_provider() {
        let store = store();
        seed_cache(
            &store,
            vec![asset("bitcoin", 45_000.0)],
            Duration::minutes(4) + Duration::seconds(59),
        );

        let mut provider = MockProvider::new();
        provider.expect_fetch_markets().times(0);

        let cache = MarketCache::new(store, Arc::new(provider));
        let listed = cache.markets().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "bitcoin");
    }

    #[tokio::test]
    async fn stale_entry_triggers_one_fetch_and_overwrites() {
        let store = store();
        seed_cache(
            &store,
            vec![asset("bitcoin", 1.0)],
            Duration::minutes(5) + Duration::seconds(1),
        );

        let mut provider = MockProvider::new();
        provider
            .expect_fetch_markets()
            .times(1)
            .returning(|| Ok(vec![asset("bitcoin", 45_000.0)]));

        let cache = MarketCache::new(store.clone(), Arc::new(provider));
        let listed = cache.markets().await.unwrap();
        assert_eq!(listed[0].current_price, 45_000.0);

        let entry: Option<CacheEntry<Vec<MarketAsset>>> =
            store.load(keys::MARKET_DATA_CACHE, None);
        let entry = entry.unwrap();
        assert_eq!(entry.value[0].current_price, 45_000.0);
        assert!(entry.is_fresh(Duration::seconds(DEFAULT_TTL_SECS), Utc::now()));
    }

    #[tokio::test]
    async fn empty_cache_fetches() {
        let mut provider = MockProvider::new();
        provider
            .expect_fetch_markets()
            .times(1)
            .returning(|| Ok(vec![asset("ethereum", 3_000.0)]));

        let cache = MarketCache::new(store(), Arc::new(provider));
        assert_eq!(cache.markets().await.unwrap()[0].id, "ethereum");
    }

    #[tokio::test]
    async fn failed_refresh_surfaces_error_and_keeps_stale_entry() {
        let store = store();
        let stale_age = Duration::minutes(30);
        seed_cache(&store, vec![asset("bitcoin", 1.0)], stale_age);

        let mut provider = MockProvider::new();
        provider
            .expect_fetch_markets()
            .times(1)
            .returning(|| Err(AppError::Remote("provider down".into())));

        let cache = MarketCache::new(store.clone(), Arc::new(provider));
        assert!(matches!(cache.markets().await, Err(AppError::Remote(_))));

        // Stale entry untouched: not deleted, not rewritten.
        let entry: Option<CacheEntry<Vec<MarketAsset>>> =
            store.load(keys::MARKET_DATA_CACHE, None);
        let entry = entry.unwrap();
        assert_eq!(entry.value[0].current_price, 1.0);
        assert!(Utc::now() - entry.fetched_at >= stale_age);
    }

    #[tokio::test]
    async fn history_and_ohlc_are_uncached_passthroughs() {
        let mut provider = MockProvider::new();
        provider
            .expect_fetch_history()
            .times(2)
            .returning(|_, _| Ok(vec![PricePoint { timestamp: 1, price: 2.0 }]));
        provider.expect_fetch_ohlc().times(1).returning(|_, _| {
            Ok(vec![Candle {
                timestamp: 1,
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
            }])
        });

        let cache = MarketCache::new(store(), Arc::new(provider));
        cache.history("bitcoin", 30).await.unwrap();
        cache.history("bitcoin", 30).await.unwrap();
        assert_eq!(cache.ohlc("bitcoin", 1).await.unwrap()[0].close, 1.5);
    }
}
