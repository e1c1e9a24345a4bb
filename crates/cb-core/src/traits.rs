//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use crate::error::Result;
use crate::models::{Candle, MarketAsset, NewAccount, PricePoint};
use async_trait::async_trait;

/// Durable key-value persistence contract.
///
/// Synchronous by design: the backing store is a local, per-profile store and
/// every board operation is a whole-value read or overwrite. `set` never
/// surfaces failure to the caller; implementations log and swallow quota/IO
/// errors (behavioral parity with the original storage layer).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Remote market-data provider contract.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Top-N assets by market capitalization.
    async fn fetch_markets(&self) -> Result<Vec<MarketAsset>>;

    /// Historical price series for one asset over the last `days` days.
    async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>>;

    /// OHLC candlestick series for one asset over the last `days` days.
    async fn fetch_ohlc(&self, asset_id: &str, days: u32) -> Result<Vec<Candle>>;
}

/// Remote account service contract.
///
/// The service is opaque: requests are keyed by an email-like identifier and
/// either succeed with a payload (e.g. the new balance) or fail with an error
/// string and a non-2xx status. No retry, no backoff, no local order state.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str, pseudo: &str) -> Result<NewAccount>;

    /// Returns the account's display name (pseudo) on success.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String>;

    async fn balance(&self, email: &str) -> Result<f64>;

    /// These all return the new balance on success.
    async fn deposit(&self, email: &str, amount: f64) -> Result<f64>;
    async fn withdraw(&self, email: &str, amount: f64) -> Result<f64>;
    async fn transfer(&self, email: &str, to_iban: &str, amount: f64) -> Result<f64>;
    async fn buy(&self, email: &str, asset_id: &str, amount: f64) -> Result<f64>;
    async fn sell(&self, email: &str, asset_id: &str, amount: f64) -> Result<f64>;

    /// Whether a destination account identifier exists.
    async fn account_exists(&self, iban: &str) -> Result<bool>;
}
