//! Order index: lookup from order id to the live order record.

use std::collections::HashMap;
use types::ids::OrderId;
use types::order::Order;

/// Entry in the order index.
///
/// Carries the live order plus its FIFO linkage inside its price level.
/// The links name neighbours by id, so the index doubles as the arena
/// backing every level's queue.
#[derive(Debug, Clone)]
pub(crate) struct IndexedOrder {
    pub order: Order,
    pub next: Option<OrderId>,
    pub prev: Option<OrderId>,
}

/// Map from order id to the live order record.
///
/// Contains exactly the resting orders: an order enters when it rests and
/// leaves the moment it is fully filled or cancelled. This is the single
/// owning handle for every resting order.
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    orders: HashMap<OrderId, IndexedOrder>,
}

impl OrderIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
        }
    }

    /// Number of resting orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if no orders are resting
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Check whether an order id is live
    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    /// Take ownership of a resting order
    pub fn insert(&mut self, order: Order) {
        self.orders.insert(
            order.id,
            IndexedOrder {
                order,
                next: None,
                prev: None,
            },
        );
    }

    /// Look up a live order
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id).map(|node| &node.order)
    }

    /// Look up a live order for mutation
    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id).map(|node| &mut node.order)
    }

    /// Remove and return an order, ending its life in the book
    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        self.orders.remove(&id).map(|node| node.order)
    }

    pub(crate) fn node(&self, id: OrderId) -> Option<&IndexedOrder> {
        self.orders.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: OrderId) -> Option<&mut IndexedOrder> {
        self.orders.get_mut(&id)
    }
}
