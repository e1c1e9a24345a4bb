//! # Domain Models
//!
//! These structs represent the core entities of Coinboard.
//! Board entries use creation-time-derived integer ids (epoch milliseconds),
//! unique within their board.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A value paired with the instant it was fetched from a remote provider.
///
/// Created whole on every successful fetch and overwritten whole on the next
/// one; never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self { value, fetched_at }
    }

    /// Fresh iff `now - fetched_at < ttl` (strict).
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < ttl
    }
}

/// A single chat message on a per-asset message board.
///
/// Messages are append-only: no edit, no delete, no moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Creation-time-derived id, unique within the board.
    pub id: i64,
    /// Free-text display name; not an authenticated identity.
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Human-readable timestamp for display next to the message.
    pub fn display_timestamp(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// A user post on a per-asset post board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Creation-time-derived id, unique within the board.
    pub id: i64,
    /// Free-text display name; ownership checks compare against it verbatim.
    pub username: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
}

impl Post {
    /// Human-readable creation date for display in the post header.
    pub fn display_date(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// One asset row from the market listing (top-N by capitalization).
///
/// Field names mirror the provider's JSON so the listing deserializes
/// without renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAsset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    pub image: String,
}

/// One point of a historical price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Provider timestamp, epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
}

/// One candlestick of an OHLC series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Provider timestamp, epoch milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A signed-in user's locally persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    /// Display name used for board posts and ownership checks.
    pub pseudo: String,
    pub email: String,
}

/// Response payload of a successful account sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub iban: String,
    pub balance: f64,
}
