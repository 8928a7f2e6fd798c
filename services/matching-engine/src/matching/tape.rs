//! Global trade tape
//!
//! Append-only log of every trade the book has produced, in match order.
//! Also the authority for trade sequence numbers.

use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::trade::Trade;

/// The tape: every trade ever matched, plus the monotonic sequence counter.
#[derive(Debug, Clone)]
pub struct TradeTape {
    trades: Vec<Trade>,
    next_sequence: u64,
}

impl TradeTape {
    /// Create an empty tape; sequences start at 1
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Record a match and return the minted trade.
    ///
    /// The execution price must be the maker's resting price.
    pub fn record(
        &mut self,
        buyer_order_id: OrderId,
        seller_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        executed_at: i64,
    ) -> Trade {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let trade = Trade::new(
            sequence,
            buyer_order_id,
            seller_order_id,
            price,
            quantity,
            executed_at,
        );
        self.trades.push(trade.clone());
        trade
    }

    /// Number of trades on the tape
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Check if no trades have been matched yet
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// The full tape in match order
    pub fn all(&self) -> &[Trade] {
        &self.trades
    }

    /// The most recent `limit` trades in match order
    pub fn recent(&self, limit: usize) -> &[Trade] {
        let start = self.trades.len().saturating_sub(limit);
        &self.trades[start..]
    }
}

impl Default for TradeTape {
    fn default() -> Self {
        Self::new()
    }
}
