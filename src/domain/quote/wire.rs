//! Wire types for price payloads.
//!
//! Both the one-shot snapshot (`GET /api/prices`) and the live WS channel
//! speak the same shape: a JSON object mapping ticker symbol to price. The
//! snapshot is dense (every symbol); WS messages are partial (only symbols
//! whose price changed).

use crate::shared::Symbol;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A symbol → price mapping, as sent by the backend.
pub type PriceMap = HashMap<Symbol, Decimal>;
