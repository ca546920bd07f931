//! Wire types for the orders endpoints.

use crate::shared::{OrderSide, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order placement request (`POST /api/orders`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub symbol: Symbol,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub quantity: u32,
    pub price: Decimal,
}

impl NewOrder {
    /// Build a placement request, uppercasing the symbol the way the
    /// dashboard's order form does before submission.
    pub fn new(symbol: impl Into<Symbol>, side: OrderSide, quantity: u32, price: Decimal) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            side,
            quantity,
            price,
        }
    }
}

/// A recorded order, as returned by the backend.
///
/// `id` and `timestamp` are server-assigned at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: Symbol,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub quantity: u32,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_uppercases_symbol() {
        let order = NewOrder::new("aapl", OrderSide::Buy, 10, Decimal::new(15025, 2));
        assert_eq!(order.symbol, Symbol::from("AAPL"));
    }

    #[test]
    fn test_new_order_wire_shape() {
        let order = NewOrder::new("TSLA", OrderSide::Sell, 5, Decimal::new(7005, 1));
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["symbol"], "TSLA");
        assert_eq!(json["type"], "SELL");
        assert_eq!(json["quantity"], 5);
        assert_eq!(json["price"], 700.5);
    }

    #[test]
    fn test_order_deserializes_backend_response() {
        let json = r#"{
            "id": "7c6f6d54-7f0b-4f9e-8a2e-6c2f6f3e9d11",
            "symbol": "AAPL",
            "type": "BUY",
            "quantity": 10,
            "price": 150.25,
            "timestamp": "2025-06-01T09:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.symbol, Symbol::from("AAPL"));
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.quantity, 10);
        assert_eq!(order.price, Decimal::new(15025, 2));
    }
}
