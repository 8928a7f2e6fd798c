//! Request parsing and response shapes for the JSON surface.
//!
//! Prices cross this boundary as decimal dollars and are converted to
//! integer cents by rounding; the engine never sees a float. Validation
//! mirrors the admission rules: fields present and well-typed, price in
//! (0, $1,000,000], quantity in (0, 1,000,000].

use serde::Serialize;
use serde_json::Value;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Trade;

use crate::error::AppError;

/// Upper bound on order price, in dollars
pub const MAX_PRICE_DOLLARS: f64 = 1_000_000.0;
/// Upper bound on order quantity
pub const MAX_QUANTITY: u64 = 1_000_000;

/// A fully validated order placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceOrder {
    pub price: Price,
    pub quantity: Quantity,
    pub side: Side,
}

impl PlaceOrder {
    /// Validate a POST /order body.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let price = body
            .get("price")
            .ok_or_else(|| AppError::BadRequest("Missing required field: price".into()))?;
        let quantity = body
            .get("quantity")
            .ok_or_else(|| AppError::BadRequest("Missing required field: quantity".into()))?;
        let side = body
            .get("side")
            .ok_or_else(|| AppError::BadRequest("Missing required field: side".into()))?;

        let dollars = price
            .as_f64()
            .ok_or_else(|| AppError::BadRequest("Price must be a number".into()))?;
        if dollars <= 0.0 {
            return Err(AppError::BadRequest("Price must be positive".into()));
        }
        if dollars > MAX_PRICE_DOLLARS {
            return Err(AppError::BadRequest(
                "Price too large (max: $1,000,000)".into(),
            ));
        }

        let quantity = quantity
            .as_u64()
            .ok_or_else(|| AppError::BadRequest("Quantity must be a positive integer".into()))?;
        if quantity == 0 {
            return Err(AppError::BadRequest("Quantity must be greater than 0".into()));
        }
        if quantity > MAX_QUANTITY {
            return Err(AppError::BadRequest(
                "Quantity too large (max: 1,000,000)".into(),
            ));
        }

        let side = side
            .as_str()
            .ok_or_else(|| AppError::BadRequest("Side must be a string".into()))?;
        let side: Side = side
            .parse()
            .map_err(|_| AppError::BadRequest("Side must be 'BUY' or 'SELL'".into()))?;

        Ok(Self {
            price: Price::from_dollars(dollars),
            quantity: Quantity::new(quantity as u32),
            side,
        })
    }
}

/// Validate a DELETE /order body.
pub fn parse_cancel(body: &Value) -> Result<OrderId, AppError> {
    let order_id = body
        .get("order_id")
        .ok_or_else(|| AppError::BadRequest("Missing order_id".into()))?;
    let order_id = order_id
        .as_u64()
        .ok_or_else(|| AppError::BadRequest("order_id must be an unsigned integer".into()))?;
    Ok(OrderId::new(order_id))
}

/// Trade rendered for the wire, price back in dollars
#[derive(Debug, Clone, Serialize)]
pub struct TradeView {
    pub buyer_id: u64,
    pub seller_id: u64,
    pub price: f64,
    pub quantity: u32,
}

impl From<&Trade> for TradeView {
    fn from(trade: &Trade) -> Self {
        Self {
            buyer_id: trade.buyer_order_id.as_u64(),
            seller_id: trade.seller_order_id.as_u64(),
            price: trade.price.to_dollars(),
            quantity: trade.quantity.as_u32(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub status: &'static str,
    pub order_id: u64,
    pub order_count: usize,
    pub trades: Vec<TradeView>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub status: &'static str,
    pub order_id: u64,
}

/// One aggregated price level for depth display
#[derive(Debug, Serialize)]
pub struct DepthLevelView {
    pub price: f64,
    pub quantity: u64,
}

impl From<(Price, u64)> for DepthLevelView {
    fn from((price, quantity): (Price, u64)) -> Self {
        Self {
            price: price.to_dollars(),
            quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderBookResponse {
    pub best_bid: f64,
    pub best_ask: f64,
    pub spread: f64,
    pub order_count: usize,
    pub bid_levels: usize,
    pub ask_levels: usize,
    pub bids: Vec<DepthLevelView>,
    pub asks: Vec<DepthLevelView>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_orders: usize,
    pub bid_levels: usize,
    pub ask_levels: usize,
    pub best_bid: f64,
    pub best_ask: f64,
    pub spread: f64,
    pub mid_price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TradesResponse {
    pub count: usize,
    pub trades: Vec<TradeView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_place_order_parses_dollars_to_cents() {
        let body = json!({"price": 100.25, "quantity": 10, "side": "BUY"});
        let order = PlaceOrder::from_json(&body).unwrap();

        assert_eq!(order.price, Price::new(10025));
        assert_eq!(order.quantity, Quantity::new(10));
        assert_eq!(order.side, Side::BUY);
    }

    #[test]
    fn test_place_order_rounds_to_nearest_cent() {
        let body = json!({"price": 99.999, "quantity": 1, "side": "SELL"});
        let order = PlaceOrder::from_json(&body).unwrap();
        assert_eq!(order.price, Price::new(10000));
    }

    #[test]
    fn test_place_order_side_is_case_insensitive() {
        let body = json!({"price": 1.0, "quantity": 1, "side": "sell"});
        assert_eq!(PlaceOrder::from_json(&body).unwrap().side, Side::SELL);

        let body = json!({"price": 1.0, "quantity": 1, "side": "Buy"});
        assert_eq!(PlaceOrder::from_json(&body).unwrap().side, Side::BUY);
    }

    #[test]
    fn test_place_order_rejects_missing_fields() {
        for body in [
            json!({"quantity": 1, "side": "BUY"}),
            json!({"price": 1.0, "side": "BUY"}),
            json!({"price": 1.0, "quantity": 1}),
        ] {
            assert!(matches!(
                PlaceOrder::from_json(&body),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_place_order_rejects_bad_price() {
        for price in [json!(0.0), json!(-5.0), json!(1_000_001.0), json!("100")] {
            let body = json!({"price": price, "quantity": 1, "side": "BUY"});
            assert!(matches!(
                PlaceOrder::from_json(&body),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_place_order_rejects_bad_quantity() {
        for quantity in [json!(0), json!(-1), json!(1_000_001), json!(2.5)] {
            let body = json!({"price": 1.0, "quantity": quantity, "side": "BUY"});
            assert!(matches!(
                PlaceOrder::from_json(&body),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_place_order_rejects_unknown_side() {
        let body = json!({"price": 1.0, "quantity": 1, "side": "HOLD"});
        assert!(matches!(
            PlaceOrder::from_json(&body),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_cancel() {
        assert_eq!(
            parse_cancel(&json!({"order_id": 42})).unwrap(),
            OrderId::new(42)
        );
        assert!(parse_cancel(&json!({})).is_err());
        assert!(parse_cancel(&json!({"order_id": "42"})).is_err());
    }

    #[test]
    fn test_trade_view_renders_dollars() {
        let trade = Trade::new(
            1,
            OrderId::new(2),
            OrderId::new(1),
            Price::new(9900),
            Quantity::new(5),
            0,
        );
        let view = TradeView::from(&trade);

        assert_eq!(view.buyer_id, 2);
        assert_eq!(view.seller_id, 1);
        assert_eq!(view.price, 99.0);
        assert_eq!(view.quantity, 5);
    }
}
