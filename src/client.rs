//! High-level client — `TickerboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, shared config, and accessor methods.

use crate::domain::order::client::Orders;
use crate::domain::quote::client::Prices;
use crate::error::SdkError;
use crate::feed::{FeedConfig, PriceFeed};
use crate::http::TickerboardHttp;
use crate::ws::{WsClient, WsConfig};

// Re-export sub-client types for convenience.
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::quote::client::Prices as PricesClient;

/// The primary entry point for the Tickerboard SDK.
///
/// Provides nested sub-client accessors (`client.prices()`,
/// `client.orders()`) and starts feed engines via [`TickerboardClient::feed`].
#[derive(Clone)]
pub struct TickerboardClient {
    pub(crate) http: TickerboardHttp,
    pub(crate) ws_config: WsConfig,
    pub(crate) feed_config: FeedConfig,
}

impl TickerboardClient {
    pub fn builder() -> TickerboardClientBuilder {
        TickerboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    // ── Feed + WS ────────────────────────────────────────────────────────

    /// Start a live price feed: seed from the snapshot endpoint, connect the
    /// WS channel, spawn the merge task.
    ///
    /// Feed lifetimes are managed by the caller (typically tied to a
    /// dashboard session): keep the returned `PriceFeed` alive while the
    /// session runs, then `shutdown()` it.
    pub async fn feed(&self) -> Result<PriceFeed, SdkError> {
        PriceFeed::start(
            self.http.clone(),
            self.ws_config.clone(),
            self.feed_config.clone(),
        )
        .await
    }

    /// Get the WS config used for feed connections.
    pub fn ws_config(&self) -> &WsConfig {
        &self.ws_config
    }

    /// Create a raw WS client from the current config, for consumers that
    /// want the event stream without the aggregation engine.
    pub fn ws(&self) -> WsClient {
        WsClient::new(self.ws_config.clone())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TickerboardClientBuilder {
    api_url: String,
    ws_url: String,
    feed_config: FeedConfig,
}

impl Default for TickerboardClientBuilder {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            ws_url: crate::network::DEFAULT_WS_URL.to_string(),
            feed_config: FeedConfig::default(),
        }
    }
}

impl TickerboardClientBuilder {
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn ws_url(mut self, url: &str) -> Self {
        self.ws_url = url.to_string();
        self
    }

    /// Override the bounded history length (default 200 entries).
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.feed_config.history_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<TickerboardClient, SdkError> {
        Ok(TickerboardClient {
            http: TickerboardHttp::new(&self.api_url),
            ws_config: WsConfig {
                url: self.ws_url,
                ..WsConfig::default()
            },
            feed_config: self.feed_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = TickerboardClient::builder().build().unwrap();
        assert_eq!(client.http.base_url(), crate::network::DEFAULT_API_URL);
        assert_eq!(client.ws_config().url, crate::network::DEFAULT_WS_URL);
        assert_eq!(client.feed_config.history_capacity, 200);
    }

    #[test]
    fn test_builder_overrides() {
        let client = TickerboardClient::builder()
            .api_url("http://example.com:9000/")
            .ws_url("ws://example.com:9000/ws")
            .history_capacity(50)
            .build()
            .unwrap();
        assert_eq!(client.http.base_url(), "http://example.com:9000");
        assert_eq!(client.ws_config().url, "ws://example.com:9000/ws");
        assert_eq!(client.feed_config.history_capacity, 50);
    }
}
