//! Quote board — the live per-symbol price state container.
//!
//! Owned by the feed engine; everything else reads cloned snapshots.

use super::wire::PriceMap;
use super::Quote;
use crate::shared::Symbol;
use std::collections::HashMap;

/// Live price state for every symbol seen this session.
///
/// Invariants upheld by the update methods:
/// - `open` is set exactly once per symbol (at first observation) and never
///   changes afterwards.
/// - Immediately after a symbol's first observation, `current == previous`.
/// - An update batch only touches the symbols it names.
#[derive(Debug, Clone, Default)]
pub struct QuoteBoard {
    quotes: HashMap<Symbol, Quote>,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the board from the one-shot price snapshot.
    ///
    /// Every seeded symbol starts with `current == previous == open`.
    pub fn seed(&mut self, snapshot: PriceMap) {
        for (symbol, price) in snapshot {
            self.quotes.insert(symbol, Quote::opening_at(price));
        }
    }

    /// Merge a partial update batch into the board.
    ///
    /// Symbols absent from the batch are untouched. A symbol not seen before
    /// (e.g. it was missing from the seed snapshot) enters the board with
    /// `open == previous == current == new_price`. The whole batch is applied
    /// synchronously from one consistent prior-state read; callers must not
    /// interleave batches.
    pub fn apply_update(&mut self, update: &PriceMap) {
        for (symbol, &new_price) in update {
            match self.quotes.get_mut(symbol) {
                Some(quote) => {
                    quote.previous = quote.current;
                    quote.current = new_price;
                }
                None => {
                    self.quotes.insert(symbol.clone(), Quote::opening_at(new_price));
                }
            }
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn quotes(&self) -> &HashMap<Symbol, Quote> {
        &self.quotes
    }

    /// All known symbols in lexicographic order (sidebar listing order).
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.quotes.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
