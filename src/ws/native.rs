//! Native WebSocket client — `tokio-tungstenite`.
//!
//! A background tokio task owns the connection and walks the
//! {Connecting, Open, Reconnecting, Closed} state machine:
//! - Inbound messages are parsed and forwarded as `WsEvent`s; a payload that
//!   fails to parse is logged and skipped, never a panic.
//! - Transport errors force-close the connection and take the same recovery
//!   path as an abnormal close: one flat-delay reconnect timer, retried
//!   without bound while `reconnect` is enabled.
//! - Only a client-requested disconnect ends the task; the pending reconnect
//!   timer (at most one) is cancelled by it.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::domain::quote::wire::PriceMap;
use crate::error::WsError;
use crate::ws::{ReadyState, WsConfig, WsEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    Disconnect,
}

// ─── Disconnect reasons ──────────────────────────────────────────────────────

enum DisconnectReason {
    UserRequested,
    ConnectionLost(String),
}

// ─── Background task state ───────────────────────────────────────────────────

struct TaskState {
    config: WsConfig,
    event_tx: mpsc::Sender<WsEvent>,
    cmd_rx: mpsc::Receiver<Command>,
    ready_state: Arc<AtomicU8>,
}

impl TaskState {
    /// Forward an event, applying backpressure rather than dropping:
    /// a slow consumer delays the channel, it never loses an update.
    async fn emit(&self, event: WsEvent) {
        let _ = self.event_tx.send(event).await;
    }

    fn set_ready(&self, state: ReadyState) {
        self.ready_state.store(state as u8, Ordering::SeqCst);
    }
}

// ─── Public WsClient ─────────────────────────────────────────────────────────

/// WebSocket client for the live price update channel.
///
/// `connect` spawns a background tokio task managing the connection and
/// returns the event receiver; the public API talks to the task over an
/// mpsc command channel.
pub struct WsClient {
    config: WsConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    ready_state: Arc<AtomicU8>,
    task_handle: Option<JoinHandle<()>>,
}

impl WsClient {
    /// Create a new WS client. Does not connect yet.
    pub fn new(config: WsConfig) -> Self {
        Self {
            config,
            cmd_tx: None,
            ready_state: Arc::new(AtomicU8::new(ReadyState::Closed as u8)),
            task_handle: None,
        }
    }

    /// Spawn the background connection task and return its event stream.
    ///
    /// Must be called from within a tokio runtime. Returns
    /// `WsError::AlreadyConnected` if a task is already running.
    pub fn connect(&mut self) -> Result<mpsc::Receiver<WsEvent>, WsError> {
        if self.cmd_tx.is_some() {
            return Err(WsError::AlreadyConnected);
        }

        let (event_tx, event_rx) = mpsc::channel(256);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        self.cmd_tx = Some(cmd_tx);
        self.ready_state
            .store(ReadyState::Connecting as u8, Ordering::SeqCst);

        let state = TaskState {
            config: self.config.clone(),
            event_tx,
            cmd_rx,
            ready_state: Arc::clone(&self.ready_state),
        };

        self.task_handle = Some(tokio::spawn(run_task(state)));
        Ok(event_rx)
    }

    /// Disconnect and stop the background task.
    ///
    /// Idempotent: safe to call when never connected or already closed.
    /// Cancels a pending reconnect timer if one is waiting.
    pub async fn disconnect(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Disconnect).await;
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }

        self.ready_state
            .store(ReadyState::Closed as u8, Ordering::SeqCst);
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from(self.ready_state.load(Ordering::SeqCst))
    }

    /// Whether the WebSocket is currently open.
    pub fn is_connected(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) {
    loop {
        // ── 1. Attempt connection ────────────────────────────────────────
        state.set_ready(ReadyState::Connecting);
        let stream = match attempt_connect(&state.config.url).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("WebSocket connection failed: {}", e);
                state.emit(WsEvent::Error(e.to_string())).await;

                if state.config.reconnect {
                    if wait_reconnect(&mut state).await {
                        return;
                    }
                    continue;
                }
                state.set_ready(ReadyState::Closed);
                return;
            }
        };

        // ── 2. Connected ─────────────────────────────────────────────────
        state.set_ready(ReadyState::Open);
        state.emit(WsEvent::Connected).await;
        tracing::info!(url = %state.config.url, "Price channel connected");

        // ── 3. Pump messages until the connection breaks ─────────────────
        let reason = run_connected(&mut state, stream).await;

        match reason {
            DisconnectReason::UserRequested => {
                state.set_ready(ReadyState::Closed);
                return;
            }
            DisconnectReason::ConnectionLost(why) => {
                tracing::warn!("Price channel lost: {}", why);
                state.emit(WsEvent::Disconnected { reason: why }).await;

                if state.config.reconnect {
                    if wait_reconnect(&mut state).await {
                        return;
                    }
                    continue;
                }
                state.set_ready(ReadyState::Closed);
                return;
            }
        }
    }
}

/// The inner connected loop — runs until the connection breaks.
async fn run_connected(state: &mut TaskState, mut stream: WsStream) -> DisconnectReason {
    loop {
        tokio::select! {
            // ── a) Incoming WS message ───────────────────────────────────
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let text_str: &str = text.as_ref();
                        match serde_json::from_str::<PriceMap>(text_str) {
                            Ok(update) => {
                                state.emit(WsEvent::Update(update)).await;
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "Malformed price update: {} — raw: {}",
                                    e,
                                    text_str
                                );
                                state
                                    .emit(WsEvent::Error(format!("Malformed update: {}", e)))
                                    .await;
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = stream.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        return DisconnectReason::ConnectionLost(describe_close(frame.as_ref()));
                    }
                    Some(Ok(_)) => {} // Binary, Pong, Frame — ignore
                    Some(Err(e)) => {
                        // Force-close so errors and closes share one recovery path.
                        let _ = stream.close(None).await;
                        return DisconnectReason::ConnectionLost(e.to_string());
                    }
                    None => {
                        return DisconnectReason::ConnectionLost("Stream ended".into());
                    }
                }
            }

            // ── b) Command from public API ───────────────────────────────
            cmd = state.cmd_rx.recv() => {
                match cmd {
                    Some(Command::Disconnect) | None => {
                        let _ = stream.close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "client disconnect".into(),
                        })).await;
                        return DisconnectReason::UserRequested;
                    }
                }
            }
        }
    }
}

/// Flat-delay reconnect wait. Returns `true` if a disconnect command arrived
/// during the wait (the timer is cancelled and the task must stop).
async fn wait_reconnect(state: &mut TaskState) -> bool {
    state.set_ready(ReadyState::Reconnecting);
    let delay = Duration::from_millis(state.config.reconnect_delay_ms);
    tracing::info!(delay_ms = state.config.reconnect_delay_ms, "Reconnecting after delay");

    tokio::select! {
        _ = tokio::time::sleep(delay) => false,
        cmd = state.cmd_rx.recv() => match cmd {
            Some(Command::Disconnect) | None => {
                state.set_ready(ReadyState::Closed);
                true
            }
        },
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Attempt to establish a WebSocket connection with a 30-second timeout.
async fn attempt_connect(url: &str) -> Result<WsStream, WsError> {
    let (ws_stream, _) = tokio::time::timeout(Duration::from_secs(30), connect_async(url))
        .await
        .map_err(|_| WsError::ConnectionFailed("Connection timeout".into()))?
        .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

    Ok(ws_stream)
}

/// Human-readable reason from an optional close frame.
fn describe_close(frame: Option<&CloseFrame>) -> String {
    match frame {
        Some(f) => format!("Closed (code {}): {}", u16::from(f.code), f.reason),
        None => "Closed without a close frame".into(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> WsConfig {
        WsConfig {
            url: "ws://127.0.0.1:1".into(),
            reconnect: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_client_is_closed() {
        let client = WsClient::new(WsConfig::default());
        assert_eq!(client.ready_state(), ReadyState::Closed);
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_when_never_connected() {
        let mut client = WsClient::new(WsConfig::default());
        client.disconnect().await;
        client.disconnect().await;
        assert_eq!(client.ready_state(), ReadyState::Closed);
    }

    #[tokio::test]
    async fn test_second_connect_rejected() {
        let mut client = WsClient::new(unreachable_config());
        let _events = client.connect().unwrap();
        assert!(matches!(client.connect(), Err(WsError::AlreadyConnected)));
        client.disconnect().await;
    }

    #[tokio::test]
    async fn test_connect_after_disconnect_allowed() {
        let mut client = WsClient::new(unreachable_config());
        let _events = client.connect().unwrap();
        client.disconnect().await;
        assert!(client.connect().is_ok());
        client.disconnect().await;
    }

    #[test]
    fn test_describe_close_with_frame() {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "goodbye".into(),
        };
        assert_eq!(describe_close(Some(&frame)), "Closed (code 1000): goodbye");
    }

    #[test]
    fn test_describe_close_no_frame() {
        assert_eq!(describe_close(None), "Closed without a close frame");
    }
}
