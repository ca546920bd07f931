//! The live price-stream aggregation engine.
//!
//! `PriceFeed` owns the quote board and the bounded history log, seeds them
//! from the one-shot snapshot endpoint, then merges WS update batches into
//! them on a single background task. Each merged batch produces one dense
//! history entry and one published `FeedSnapshot`; consumers watch the
//! published snapshots and never touch the live state.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::history::{HistoryLog, HistoryPoint, DEFAULT_HISTORY_CAPACITY};
use crate::domain::quote::wire::PriceMap;
use crate::domain::quote::{Quote, QuoteBoard};
use crate::error::SdkError;
use crate::http::TickerboardHttp;
use crate::shared::Symbol;
use crate::ws::{ReadyState, WsClient, WsConfig, WsEvent};

// ─── Config ──────────────────────────────────────────────────────────────────

/// Configuration for the feed engine.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// History entries retained before FIFO eviction kicks in.
    pub history_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

// ─── FeedSnapshot ────────────────────────────────────────────────────────────

/// An immutable copy of the feed's state, published after every merged batch.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Current/previous/open price per known symbol.
    pub quotes: HashMap<Symbol, Quote>,
    /// The bounded history log, oldest first.
    pub history: Vec<HistoryPoint>,
}

impl FeedSnapshot {
    pub fn quote(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    /// Known symbols in lexicographic order (sidebar listing order).
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.quotes.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

// ─── FeedState ───────────────────────────────────────────────────────────────

/// The mutable state behind the feed: exclusively owned by the merge task.
#[derive(Debug)]
pub(crate) struct FeedState {
    board: QuoteBoard,
    history: HistoryLog,
}

impl FeedState {
    pub(crate) fn new(history_capacity: usize) -> Self {
        Self {
            board: QuoteBoard::new(),
            history: HistoryLog::new(history_capacity),
        }
    }

    /// Seed the board from the snapshot. No history entry is recorded for
    /// the seed itself; the log starts with the first live batch.
    pub(crate) fn seed(&mut self, snapshot: PriceMap) {
        self.board.seed(snapshot);
    }

    /// One merge cycle: apply the batch to the board, then append one dense
    /// history entry stamped at `at`. Entirely synchronous — a batch can
    /// never observe another batch mid-flight.
    pub(crate) fn merge(&mut self, update: &PriceMap, at: DateTime<Utc>) {
        self.board.apply_update(update);
        self.history.record(at, &self.board);
    }

    pub(crate) fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            quotes: self.board.quotes().clone(),
            history: self.history.to_vec(),
        }
    }
}

// ─── PriceFeed ───────────────────────────────────────────────────────────────

/// The live price-stream aggregator.
///
/// Construct per dashboard session with [`PriceFeed::start`]; tear down with
/// [`PriceFeed::shutdown`]. Instances are independent — nothing is shared
/// between feeds, so tests can run several side by side.
pub struct PriceFeed {
    ws: WsClient,
    task: Option<JoinHandle<()>>,
    snapshot_rx: watch::Receiver<FeedSnapshot>,
}

impl PriceFeed {
    /// Seed from the snapshot endpoint, open the live channel, and start the
    /// merge task.
    ///
    /// A failed seed is not fatal: it is logged and the feed starts with an
    /// empty board (live updates will still populate it). The first
    /// published snapshot is the post-seed state.
    pub async fn start(
        http: TickerboardHttp,
        ws_config: WsConfig,
        config: FeedConfig,
    ) -> Result<Self, SdkError> {
        let mut state = FeedState::new(config.history_capacity);

        match http.get_prices().await {
            Ok(snapshot) => {
                tracing::info!(symbols = snapshot.len(), "Seeded quote board from snapshot");
                state.seed(snapshot);
            }
            Err(e) => {
                tracing::warn!(
                    "Initial price snapshot failed: {} — starting with an empty board",
                    e
                );
            }
        }

        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let mut ws = WsClient::new(ws_config);
        let events = ws.connect()?;
        let task = tokio::spawn(run_feed(events, state, snapshot_tx));

        Ok(Self {
            ws,
            task: Some(task),
            snapshot_rx,
        })
    }

    /// A receiver that yields a fresh [`FeedSnapshot`] after every merged
    /// batch.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_rx.clone()
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Connection state of the underlying channel.
    pub fn ready_state(&self) -> ReadyState {
        self.ws.ready_state()
    }

    pub fn is_connected(&self) -> bool {
        self.ws.is_connected()
    }

    /// Close the live channel and stop the merge task.
    ///
    /// Idempotent. Cancels any pending reconnect; no state is mutated after
    /// this returns.
    pub async fn shutdown(&mut self) {
        self.ws.disconnect().await;
        if let Some(task) = self.task.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), task).await;
        }
    }
}

impl Drop for PriceFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ─── Merge task ──────────────────────────────────────────────────────────────

/// Drains WS events in arrival order. Each update batch is merged and
/// published before the next is read, so no batch is lost, reordered, or
/// applied twice; merging itself never awaits.
async fn run_feed(
    mut events: mpsc::Receiver<WsEvent>,
    mut state: FeedState,
    snapshot_tx: watch::Sender<FeedSnapshot>,
) {
    while let Some(event) = events.recv().await {
        match event {
            WsEvent::Update(update) => {
                state.merge(&update, Utc::now());
                let _ = snapshot_tx.send(state.snapshot());
            }
            WsEvent::Connected => {
                tracing::info!("Live price feed connected");
            }
            WsEvent::Disconnected { reason } => {
                tracing::warn!("Live price feed disconnected: {}", reason);
            }
            WsEvent::Error(e) => {
                tracing::warn!("Live price feed error: {}", e);
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
