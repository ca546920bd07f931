//! # Tickerboard SDK
//!
//! A Rust client SDK for the Tickerboard live trading dashboard backend.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes and domain models (quotes, history, orders)
//! 2. **HTTP API** — `TickerboardHttp` with per-endpoint retry policies
//! 3. **WebSocket** — `WsClient` over `tokio-tungstenite` with automatic reconnection
//! 4. **Feed Engine** — `PriceFeed`: merges live partial price updates into a
//!    consistent quote board and a bounded price history log
//! 5. **High-Level Client** — `TickerboardClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickerboard::prelude::*;
//!
//! let client = TickerboardClient::builder()
//!     .api_url("http://localhost:8000")
//!     .build()?;
//!
//! let mut feed = client.feed().await?;
//! let mut updates = feed.subscribe();
//!
//! while updates.changed().await.is_ok() {
//!     let snapshot = updates.borrow_and_update().clone();
//!     let series = resample(&snapshot.history, RangeMode::H24);
//!     // render series.points against series.x_axis ...
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, state containers.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: WebSocket ───────────────────────────────────────────────────────

/// WebSocket client: live price update channel, events, reconnection.
pub mod ws;

// ── Layer 4: Feed Engine ─────────────────────────────────────────────────────

/// `PriceFeed` — the live price-stream aggregation engine.
pub mod feed;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `TickerboardClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{OrderSide, Symbol};

    // Domain types — quotes
    pub use crate::domain::quote::wire::PriceMap;
    pub use crate::domain::quote::{Quote, QuoteBoard};

    // Domain types — history
    pub use crate::domain::history::resample::{
        resample, resample_at, RangeMode, Resampled, XAxis,
    };
    pub use crate::domain::history::{HistoryLog, HistoryPoint, DEFAULT_HISTORY_CAPACITY};

    // Domain types — orders
    pub use crate::domain::order::{NewOrder, Order};

    // Errors
    pub use crate::error::{HttpError, SdkError, WsError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_WS_URL};

    // HTTP client + sub-clients
    pub use crate::client::{
        OrdersClient, PricesClient, TickerboardClient, TickerboardClientBuilder,
    };
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // WebSocket types
    pub use crate::ws::{ReadyState, WsClient, WsConfig, WsEvent};

    // Feed engine
    pub use crate::feed::{FeedConfig, FeedSnapshot, PriceFeed};
}
