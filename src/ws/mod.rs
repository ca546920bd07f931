//! WebSocket layer — the live price update channel.
//!
//! The backend pushes partial symbol → price maps at irregular intervals;
//! the client sends nothing on this channel. `native.rs` holds the
//! `tokio-tungstenite` transport with its background connection task.

pub mod native;

use crate::domain::quote::wire::PriceMap;

pub use native::WsClient;

// ─── WsEvent ─────────────────────────────────────────────────────────────────

/// High-level events emitted by the WS client to the consumer.
#[derive(Debug, Clone)]
pub enum WsEvent {
    /// Connection established (also emitted after each reconnect).
    Connected,
    /// A parsed partial price update batch.
    Update(PriceMap),
    /// Connection lost; a reconnect will be scheduled if enabled.
    Disconnected { reason: String },
    /// A malformed payload or transport-level fault. The channel keeps
    /// running; the offending message is skipped.
    Error(String),
}

// ─── ReadyState ──────────────────────────────────────────────────────────────

/// Connection state machine, driven by connection events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Reconnecting = 2,
    Closed = 3,
}

impl From<u8> for ReadyState {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Reconnecting,
            _ => Self::Closed,
        }
    }
}

// ─── WsConfig ────────────────────────────────────────────────────────────────

/// Configuration for the WS client.
#[derive(Debug, Clone)]
pub struct WsConfig {
    pub url: String,
    /// Reconnect after any abnormal close or transport error.
    pub reconnect: bool,
    /// Flat delay before each reconnect attempt. No exponential backoff and
    /// no attempt cap: eventual consistency is preferred over resource
    /// bounding during long outages.
    pub reconnect_delay_ms: u64,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_WS_URL.to_string(),
            reconnect: true,
            reconnect_delay_ms: 2000,
        }
    }
}
