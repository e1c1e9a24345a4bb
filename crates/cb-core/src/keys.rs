//! # Storage Keys
//!
//! Every persisted value lives under a key built here. Per-asset boards use
//! the `<feature>-<assetId>-<kind>` pattern; the market cache, theme flag and
//! session fields use fixed keys.

/// Market listing cache entry (`CacheEntry<Vec<MarketAsset>>`).
pub const MARKET_DATA_CACHE: &str = "market-data-cache";

/// Global dark-mode flag, shared across all views.
pub const THEME_DARK_MODE: &str = "theme-dark-mode";

/// Session fields written on sign-in, cleared on sign-out.
pub const AUTH_TOKEN: &str = "auth-token";
pub const USER_PSEUDO: &str = "user-pseudo";
pub const USER_EMAIL: &str = "user-email";

/// Message board for one asset (`Vec<Message>`).
pub fn chat_messages(asset_id: &str) -> String {
    format!("chat-{asset_id}-messages")
}

/// Post board for one asset (`Vec<Post>`).
pub fn forum_posts(asset_id: &str) -> String {
    format!("forum-{asset_id}-posts")
}

/// Ids of posts currently shown expanded (`BTreeSet<i64>`).
pub fn forum_expanded(asset_id: &str) -> String {
    format!("forum-{asset_id}-expanded")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_asset_keys_are_namespaced_by_asset() {
        assert_eq!(chat_messages("bitcoin"), "chat-bitcoin-messages");
        assert_eq!(forum_posts("ethereum"), "forum-ethereum-posts");
        assert_ne!(forum_posts("bitcoin"), forum_posts("ethereum"));
        assert_ne!(forum_posts("bitcoin"), forum_expanded("bitcoin"));
    }
}
