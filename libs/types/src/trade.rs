//! Trade records.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// An immutable record of a match between two orders.
///
/// The execution price is always the resting (maker) order's price, even
/// when the incoming order's limit was more aggressive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Position in the global tape, monotonic from 1
    pub sequence: u64,
    pub buyer_order_id: OrderId,
    pub seller_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    /// Unix nanos
    pub executed_at: i64,
}

impl Trade {
    /// Create a new trade record
    pub fn new(
        sequence: u64,
        buyer_order_id: OrderId,
        seller_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        executed_at: i64,
    ) -> Self {
        Self {
            sequence,
            buyer_order_id,
            seller_order_id,
            price,
            quantity,
            executed_at,
        }
    }

    /// Traded value in minor units (price x quantity)
    pub fn notional(&self) -> u64 {
        self.price.as_u64() * self.quantity.as_u64()
    }
}
