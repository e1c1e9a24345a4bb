//! # Coinboard Binary
//!
//! The entry point that assembles the services from the compiled-in plugins
//! and runs a short smoke flow: restore the persisted session, serve the
//! market listing through the cache and summarize the local boards.

mod config;

use cb_boards::{MessageBoard, PostBoard, SortKey};
use cb_core::traits::KeyValueStore;
use cb_market::MarketCache;
use cb_store::{PreferenceStore, SessionStore, TypedStore};
use config::Settings;
use std::sync::Arc;

// Feature-gated imports: the binary is compiled to order.
#[cfg(feature = "kv-file")]
use cb_kv_file::FileKvStore;

#[cfg(all(feature = "kv-memory", not(feature = "kv-file")))]
use cb_kv_memory::MemoryKvStore;

#[cfg(feature = "market-coingecko")]
use cb_market_coingecko::CoinGeckoProvider;

#[cfg(feature = "account-http")]
use cb_account_http::HttpAccountClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;
    tracing::info!(data_dir = %settings.data_dir, "coinboard starting");

    // 1. Key-value store implementation
    #[cfg(feature = "kv-file")]
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(&settings.data_dir)?);

    #[cfg(all(feature = "kv-memory", not(feature = "kv-file")))]
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());

    let store = TypedStore::new(kv);

    // 2. Services over the store
    let prefs = PreferenceStore::new(store.clone());
    let sessions = SessionStore::new(store.clone());
    let messages = MessageBoard::new(store.clone());
    let posts = PostBoard::new(store.clone());

    tracing::info!(dark_mode = prefs.dark_mode(), "preferences loaded");
    let session = sessions.load();
    match &session {
        Some(session) => tracing::info!(pseudo = %session.pseudo, "session restored"),
        None => tracing::info!("no persisted session, browsing anonymously"),
    }

    // 3. Remote collaborators
    #[cfg(feature = "account-http")]
    if let Some(session) = &session {
        use cb_core::traits::AccountService;

        let accounts = HttpAccountClient::new(&settings.account_api_base);
        match accounts.balance(&session.email).await {
            Ok(balance) => tracing::info!(balance, "account balance"),
            Err(err) => tracing::warn!(%err, "account service unavailable"),
        }
    }

    #[cfg(feature = "market-coingecko")]
    {
        let market = MarketCache::with_ttl(
            store.clone(),
            Arc::new(CoinGeckoProvider::new(&settings.market_api_base)),
            chrono::Duration::seconds(settings.cache_ttl_secs),
        );

        match market.markets().await {
            Ok(assets) => {
                for asset in &assets {
                    tracing::info!(
                        id = %asset.id,
                        price = asset.current_price,
                        change_24h = asset.price_change_percentage_24h,
                        "asset"
                    );
                }
                for asset in assets.iter().take(1) {
                    let message_count = messages.list(&asset.id).len();
                    let post_count = posts.list(&asset.id, SortKey::Date).len();
                    tracing::info!(
                        asset = %asset.id,
                        message_count,
                        post_count,
                        "board summary"
                    );
                }
            }
            Err(err) => tracing::error!(%err, "market listing unavailable"),
        }
    }

    Ok(())
}
