//! Price history domain — dense per-update snapshots and chart resampling.

pub mod log;
pub mod resample;

use crate::shared::Symbol;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use log::{HistoryLog, DEFAULT_HISTORY_CAPACITY};

/// One entry in the price history log: a dense snapshot of every symbol
/// known at the moment an update batch was merged.
///
/// The fixed fields live beside a nested symbol → price map rather than in a
/// flat object, so a ticker symbol can never collide with a reserved key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// When the batch was merged. Processing order is authoritative: the log
    /// is appended in non-decreasing `at` order.
    pub at: DateTime<Utc>,
    /// Short time label derived from `at`, for display only.
    pub label: String,
    /// Bucket key, set only on points produced by week/month resampling.
    pub bucket: Option<String>,
    /// Current price of every known symbol at that instant (dense, not a diff).
    pub prices: HashMap<Symbol, Decimal>,
}

impl HistoryPoint {
    /// Build a point stamped at `at` from a dense price mapping.
    pub fn new(at: DateTime<Utc>, prices: HashMap<Symbol, Decimal>) -> Self {
        Self {
            at,
            label: at.format("%H:%M:%S").to_string(),
            bucket: None,
            prices,
        }
    }

    pub fn price(&self, symbol: &Symbol) -> Option<Decimal> {
        self.prices.get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_label_is_short_time() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 5).unwrap();
        let point = HistoryPoint::new(at, HashMap::new());
        assert_eq!(point.label, "09:30:05");
        assert_eq!(point.bucket, None);
    }
}
