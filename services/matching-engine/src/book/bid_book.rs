//! Bid (buy-side) order book
//!
//! Maintains buy price levels with the highest price as the best bid.
//! Uses BTreeMap for ordered, deterministic iteration.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::index::OrderIndex;
use super::price_level::PriceLevel;

/// Bid (buy) side of the book
///
/// Levels are keyed by price; the best bid is the largest key. Within a
/// level, orders queue in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Queue a resting order at its price level, creating the level if needed
    pub fn insert(&mut self, id: OrderId, price: Price, index: &mut OrderIndex) {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(id, index);
    }

    /// Remove a resting order, deleting its level if it becomes empty.
    ///
    /// # Panics
    /// Panics if no level exists at the order's price; the caller must have
    /// verified the order is live on this side.
    pub fn remove(&mut self, id: OrderId, price: Price, index: &mut OrderIndex) {
        let level = self
            .levels
            .get_mut(&price)
            .expect("no bid level for resting order");
        level.unlink(id, index);
        if level.is_empty() {
            self.levels.remove(&price);
        }
    }

    /// Best (highest) bid price
    pub fn best_bid(&self) -> Option<Price> {
        // BTreeMap iterates ascending, so the best bid is the last key
        self.levels.keys().next_back().copied()
    }

    /// Mutable access to the best bid level
    pub fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
            .map(|(price, level)| (*price, level))
    }

    /// Drop a level outright (used when matching exhausts it)
    pub fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    /// Top N levels as (price, total quantity), best first
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, u64)> {
        self.levels
            .iter()
            .rev() // highest prices first
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of distinct price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub(crate) fn levels(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter()
    }
}
