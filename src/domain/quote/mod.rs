//! Quote domain — per-symbol live price state.

pub mod client;
pub mod state;
pub mod wire;

use rust_decimal::Decimal;

pub use state::QuoteBoard;

/// Live price state for one symbol.
///
/// `open` is the session-open price: the first price observed for the symbol
/// since the feed started (from the seed snapshot or, failing that, the first
/// live update). It is set exactly once and never changes for the lifetime of
/// the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Latest known price.
    pub current: Decimal,
    /// The value of `current` immediately before the most recent update.
    pub previous: Decimal,
    /// Session-open price, immutable once set.
    pub open: Decimal,
}

impl Quote {
    /// A quote seen for the first time: zero delta, session-open at `price`.
    pub fn opening_at(price: Decimal) -> Self {
        Self {
            current: price,
            previous: price,
            open: price,
        }
    }

    /// Percent change of `current` against the session-open price.
    ///
    /// Zero when the open price is zero, so a degenerate seed never divides
    /// by zero.
    pub fn percent_change(&self) -> Decimal {
        if self.open.is_zero() {
            return Decimal::ZERO;
        }
        (self.current - self.open) / self.open * Decimal::ONE_HUNDRED
    }

    /// Whether the most recent update moved the price up (or left it flat).
    pub fn is_up(&self) -> bool {
        self.current >= self.previous
    }
}
