//! Network URL constants for the Tickerboard SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default WebSocket URL.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";
