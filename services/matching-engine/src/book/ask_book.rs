//! Ask (sell-side) order book
//!
//! Maintains sell price levels with the lowest price as the best ask.
//! Uses BTreeMap for ordered, deterministic iteration.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::index::OrderIndex;
use super::price_level::PriceLevel;

/// Ask (sell) side of the book
///
/// Levels are keyed by price; the best ask is the smallest key. Within a
/// level, orders queue in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
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
            .expect("no ask level for resting order");
        level.unlink(id, index);
        if level.is_empty() {
            self.levels.remove(&price);
        }
    }

    /// Best (lowest) ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Mutable access to the best ask level
    pub fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
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
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Check if the ask book is empty
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
