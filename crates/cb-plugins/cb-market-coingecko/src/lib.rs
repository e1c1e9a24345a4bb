//! # cb-market-coingecko
//!
//! CoinGecko-backed implementation of `MarketDataProvider`.
//!
//! Three endpoints are consumed: `/coins/markets` for the top-N listing,
//! `/coins/{id}/market_chart` for price history and `/coins/{id}/ohlc` for
//! candlesticks. History and OHLC come back as positional arrays
//! (`[timestamp, ...]` with millisecond timestamps) and are mapped onto the
//! domain structs here.

use async_trait::async_trait;
use cb_core::error::{AppError, Result};
use cb_core::models::{Candle, MarketAsset, PricePoint};
use cb_core::traits::MarketDataProvider;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// How many assets the listing requests, by descending market cap.
const LISTING_PER_PAGE: u32 = 10;

pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct MarketChart {
    prices: Vec<(i64, f64)>,
}

impl CoinGeckoProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "market data request failed");
            return Err(AppError::Remote(format!("{url} returned {status}")));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Remote(e.to_string()))
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_markets(&self) -> Result<Vec<MarketAsset>> {
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", "usd".into()),
                ("order", "market_cap_desc".into()),
                ("per_page", LISTING_PER_PAGE.to_string()),
                ("page", "1".into()),
                ("sparkline", "false".into()),
            ],
        )
        .await
    }

    async fn fetch_history(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let chart: MarketChart = self
            .get_json(
                &format!("/coins/{asset_id}/market_chart"),
                &[("vs_currency", "usd".into()), ("days", days.to_string())],
            )
            .await?;
        Ok(chart
            .prices
            .into_iter()
            .map(|(timestamp, price)| PricePoint { timestamp, price })
            .collect())
    }

    async fn fetch_ohlc(&self, asset_id: &str, days: u32) -> Result<Vec<Candle>> {
        // Rows are [timestamp_ms, open, high, low, close].
        let rows: Vec<(i64, f64, f64, f64, f64)> = self
            .get_json(
                &format!("/coins/{asset_id}/ohlc"),
                &[("vs_currency", "usd".into()), ("days", days.to_string())],
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(|(timestamp, open, high, low, close)| Candle {
                timestamp,
                open,
                high,
                low,
                close,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_payload_deserializes() {
        let json = r#"[{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.example/btc.png",
            "current_price": 45123.45,
            "market_cap": 1000,
            "price_change_percentage_24h": -1.52
        }]"#;
        let assets: Vec<MarketAsset> = serde_json::from_str(json).unwrap();
        assert_eq!(assets[0].id, "bitcoin");
        assert_eq!(assets[0].current_price, 45123.45);
        assert_eq!(assets[0].price_change_percentage_24h, -1.52);
    }

    #[test]
    fn chart_payload_deserializes_positional_pairs() {
        let json = r#"{"prices": [[1700000000000, 42000.5], [1700000060000, 42001.0]]}"#;
        let chart: MarketChart = serde_json::from_str(json).unwrap();
        assert_eq!(chart.prices.len(), 2);
        assert_eq!(chart.prices[0], (1_700_000_000_000, 42000.5));
    }

    #[test]
    fn ohlc_rows_deserialize_positionally() {
        let json = "[[1700000000000, 1.0, 2.0, 0.5, 1.5]]";
        let rows: Vec<(i64, f64, f64, f64, f64)> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].4, 1.5);
    }
}
