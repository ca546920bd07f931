//! Bounded price history log — append-only with FIFO eviction.

use super::HistoryPoint;
use crate::domain::quote::QuoteBoard;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Number of history entries retained by default.
///
/// The bound caps memory for a long-lived session; it deliberately trades
/// full history for recency.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Rolling buffer of dense price snapshots, oldest first.
///
/// Entries are never mutated or reordered after insertion; once the buffer
/// is full the oldest entry is evicted for each new append.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Snapshot the board's current prices and append, stamped at `at`.
    pub fn record(&mut self, at: DateTime<Utc>, board: &QuoteBoard) {
        let prices = board
            .quotes()
            .iter()
            .map(|(symbol, quote)| (symbol.clone(), quote.current))
            .collect();
        self.push(HistoryPoint::new(at, prices));
    }

    /// Append a point, evicting the oldest entry if at capacity.
    pub fn push(&mut self, point: HistoryPoint) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// Owned chronological copy, for publishing and resampling.
    pub fn to_vec(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Symbol;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn point_at(seconds: i64, price: i64) -> HistoryPoint {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + Duration::seconds(seconds);
        let mut prices = HashMap::new();
        prices.insert(Symbol::from("AAPL"), Decimal::new(price, 0));
        HistoryPoint::new(at, prices)
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut log = HistoryLog::new(10);
        log.push(point_at(0, 100));
        log.push(point_at(1, 101));
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.latest().unwrap().price(&Symbol::from("AAPL")),
            Some(Decimal::new(101, 0))
        );
    }

    #[test]
    fn test_record_takes_dense_snapshot() {
        let mut board = QuoteBoard::new();
        board.seed(
            [
                (Symbol::from("AAPL"), Decimal::new(150, 0)),
                (Symbol::from("TSLA"), Decimal::new(700, 0)),
            ]
            .into_iter()
            .collect(),
        );
        // Update touches only AAPL; the snapshot must still carry TSLA.
        board.apply_update(
            &[(Symbol::from("AAPL"), Decimal::new(151, 0))]
                .into_iter()
                .collect(),
        );

        let mut log = HistoryLog::new(10);
        log.record(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(), &board);

        let latest = log.latest().unwrap();
        assert_eq!(latest.prices.len(), 2);
        assert_eq!(
            latest.price(&Symbol::from("AAPL")),
            Some(Decimal::new(151, 0))
        );
        assert_eq!(
            latest.price(&Symbol::from("TSLA")),
            Some(Decimal::new(700, 0))
        );
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut log = HistoryLog::new(DEFAULT_HISTORY_CAPACITY);
        for i in 0..(DEFAULT_HISTORY_CAPACITY as i64 + 1) {
            log.push(point_at(i, 100 + i));
        }
        assert_eq!(log.len(), DEFAULT_HISTORY_CAPACITY);
        // The very first entry (price 100) is gone; the second is now oldest.
        let oldest = log.iter().next().unwrap();
        assert_eq!(
            oldest.price(&Symbol::from("AAPL")),
            Some(Decimal::new(101, 0))
        );
        assert_eq!(
            log.latest().unwrap().price(&Symbol::from("AAPL")),
            Some(Decimal::new(100 + DEFAULT_HISTORY_CAPACITY as i64, 0))
        );
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut log = HistoryLog::new(3);
        for i in 0..50 {
            log.push(point_at(i, i));
            assert!(log.len() <= 3);
        }
        let prices: Vec<_> = log
            .iter()
            .map(|p| p.price(&Symbol::from("AAPL")).unwrap())
            .collect();
        assert_eq!(
            prices,
            vec![Decimal::new(47, 0), Decimal::new(48, 0), Decimal::new(49, 0)]
        );
    }
}
