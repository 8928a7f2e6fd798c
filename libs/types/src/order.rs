//! Order lifecycle types.

use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(non_camel_case_types)]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }

    /// Wire-protocol side id
    pub fn side_id(&self) -> u8 {
        match self {
            Side::BUY => 0,
            Side::SELL => 1,
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    /// Case-insensitive parse, so the boundary accepts `buy`/`Buy`/`BUY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("BUY") {
            Ok(Side::BUY)
        } else if s.eq_ignore_ascii_case("SELL") {
            Ok(Side::SELL)
        } else {
            Err(OrderError::InvalidSide(s.to_string()))
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

/// Order status
///
/// FILLED and CANCELLED are terminal: an order in either state has been
/// destroyed and is no longer reachable from any book structure. REJECTED
/// is a pre-admission outcome and is never stored on a live order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Resting with no fills
    New,
    /// Resting with some quantity executed
    PartiallyFilled,
    /// Completely executed (terminal)
    Filled,
    /// Cancelled by the owner (terminal)
    Cancelled,
    /// Failed admission validation (terminal, never stored)
    Rejected,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }

    /// Wire-protocol state id
    pub fn state_id(&self) -> u8 {
        match self {
            OrderStatus::New => 0,
            OrderStatus::PartiallyFilled => 1,
            OrderStatus::Filled => 2,
            OrderStatus::Cancelled => 3,
            OrderStatus::Rejected => 4,
        }
    }
}

/// A limit order.
///
/// Invariants: `filled_quantity <= quantity`; status is FILLED iff the two
/// are equal; status is PARTIALLY_FILLED iff some but not all quantity is
/// filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub filled_quantity: Quantity,
    pub side: Side,
    pub status: OrderStatus,
    /// Unix nanos
    pub created_at: i64,
}

impl Order {
    /// Create a new unfilled order
    pub fn new(id: OrderId, price: Price, quantity: Quantity, side: Side, timestamp: i64) -> Self {
        Self {
            id,
            price,
            quantity,
            filled_quantity: Quantity::zero(),
            side,
            status: OrderStatus::New,
            created_at: timestamp,
        }
    }

    /// Quantity still open for execution
    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity - self.filled_quantity
    }

    /// Check if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled_quantity >= self.quantity
    }

    /// Check if the order has any fills
    pub fn has_fills(&self) -> bool {
        !self.filled_quantity.is_zero()
    }

    /// Apply a fill and adjust status
    ///
    /// # Panics
    /// Panics if the fill would exceed the order quantity
    pub fn fill(&mut self, quantity: Quantity) {
        let new_filled = self.filled_quantity + quantity;

        assert!(
            new_filled <= self.quantity,
            "Fill would exceed order quantity"
        );

        self.filled_quantity = new_filled;

        if self.is_filled() {
            self.status = OrderStatus::Filled;
        } else if self.has_fills() {
            self.status = OrderStatus::PartiallyFilled;
        }

        debug_assert!(self.check_invariant(), "Invariant violated after fill");
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if the order is already in a terminal state
    pub fn cancel(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");
        self.status = OrderStatus::Cancelled;
    }

    /// Check the fill/status invariant
    pub fn check_invariant(&self) -> bool {
        if self.filled_quantity > self.quantity {
            return false;
        }
        match self.status {
            OrderStatus::Filled => self.filled_quantity == self.quantity,
            OrderStatus::PartiallyFilled => self.has_fills() && !self.is_filled(),
            OrderStatus::New => !self.has_fills(),
            OrderStatus::Cancelled | OrderStatus::Rejected => true,
        }
    }
}
