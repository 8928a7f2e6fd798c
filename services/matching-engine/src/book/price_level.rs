//! Price level: FIFO queue of resting orders at one price.
//!
//! Orders are maintained in strict arrival order to enforce time priority.
//! The queue is an intrusive doubly-linked list threaded through the order
//! index: each entry names its neighbours by id, giving O(1) append at the
//! tail, O(1) head access, and O(1) removal by handle (no scanning on
//! cancellation).

use super::index::OrderIndex;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};

/// All resting orders at a single price, head = earliest arrival.
///
/// Maintains `total_quantity` as the sum of its orders' remaining
/// quantities, widened to u64 so the aggregate cannot overflow.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    head: Option<OrderId>,
    tail: Option<OrderId>,
    len: usize,
    total_quantity: u64,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            head: None,
            tail: None,
            len: 0,
            total_quantity: 0,
        }
    }

    /// The price this level represents
    pub fn price(&self) -> Price {
        self.price
    }

    /// Oldest resting order, next in line to trade
    pub fn head(&self) -> Option<OrderId> {
        self.head
    }

    /// Number of orders queued at this level
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Total resting quantity at this level
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Append an order at the tail of the queue (time priority).
    ///
    /// The order must already live in the index at this level's price.
    pub fn push_back(&mut self, id: OrderId, index: &mut OrderIndex) {
        let node = index.node_mut(id).expect("order missing from index");
        debug_assert_eq!(node.order.price, self.price);

        let remaining = node.order.remaining_quantity();
        node.prev = self.tail;
        node.next = None;

        match self.tail {
            Some(tail_id) => {
                index
                    .node_mut(tail_id)
                    .expect("tail order missing from index")
                    .next = Some(id);
            }
            None => self.head = Some(id),
        }

        self.tail = Some(id);
        self.len += 1;
        self.total_quantity += remaining.as_u64();
    }

    /// Remove an order from anywhere in the queue by handle.
    ///
    /// The order stays in the index; the caller decides whether it is
    /// being destroyed (fill, cancel) or merely unlinked.
    pub fn unlink(&mut self, id: OrderId, index: &mut OrderIndex) {
        let node = index.node(id).expect("order missing from index");
        let (prev, next) = (node.prev, node.next);
        let remaining = node.order.remaining_quantity();

        match prev {
            Some(prev_id) => {
                index
                    .node_mut(prev_id)
                    .expect("prev order missing from index")
                    .next = next;
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                index
                    .node_mut(next_id)
                    .expect("next order missing from index")
                    .prev = prev;
            }
            None => self.tail = prev,
        }

        let node = index.node_mut(id).expect("order missing from index");
        node.prev = None;
        node.next = None;

        self.len -= 1;
        self.total_quantity -= remaining.as_u64();
    }

    /// Account for a fill executed against this level.
    pub fn reduce(&mut self, quantity: Quantity) {
        self.total_quantity = self
            .total_quantity
            .checked_sub(quantity.as_u64())
            .expect("level quantity underflow");
    }
}
