//! Order book driver
//!
//! Mints order ids, runs the taker-vs-resting matching loop, places
//! remainders, and serves cancellation and snapshot reads.

use types::errors::OrderError;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::time::unix_nanos;
use types::trade::Trade;

use crate::book::{AskBook, BidBook, OrderIndex, PriceLevel};
use crate::matching::{crossing, TradeTape};

/// Single-instrument limit order book with price-time priority matching.
///
/// All mutation goes through `submit` and `cancel`; both take `&mut self`
/// and never block, so callers serialize access by construction. The book
/// has no participant identity and performs no self-trade prevention: a
/// trader quoting both sides of a price will trade with themselves.
#[derive(Debug)]
pub struct OrderBook {
    bids: BidBook,
    asks: AskBook,
    orders: OrderIndex,
    tape: TradeTape,
    next_order_id: u64,
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Identifier minted for the incoming order
    pub order_id: OrderId,
    /// Trades produced by this submission, in match order
    pub trades: Vec<Trade>,
}

/// Read-only top-of-book summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookSnapshot {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// Best ask minus best bid; zero unless both sides are populated
    pub spread: Price,
    pub order_count: usize,
    pub bid_levels: usize,
    pub ask_levels: usize,
}

impl OrderBook {
    /// Create an empty book; order ids start at 1
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            orders: OrderIndex::new(),
            tape: TradeTape::new(),
            next_order_id: 1,
        }
    }

    /// Submit a limit order.
    ///
    /// Validation happens before an id is allocated: a rejected submission
    /// consumes nothing. The order is matched against the opposite side;
    /// any unfilled remainder rests at its limit price, while a fully
    /// filled taker never appears in the book at all.
    pub fn submit(
        &mut self,
        price: Price,
        quantity: Quantity,
        side: Side,
    ) -> Result<Submission, OrderError> {
        if price.is_zero() {
            return Err(OrderError::InvalidPrice("price must be positive".into()));
        }
        if quantity.is_zero() {
            return Err(OrderError::InvalidQuantity(
                "quantity must be positive".into(),
            ));
        }

        let order_id = OrderId::new(self.next_order_id);
        self.next_order_id += 1;

        let mut taker = Order::new(order_id, price, quantity, side, unix_nanos());

        // Split borrows: side map, index and tape are disjoint fields
        let trades = match side {
            Side::BUY => Self::match_against_asks(
                &mut self.asks,
                &mut self.orders,
                &mut self.tape,
                &mut taker,
            ),
            Side::SELL => Self::match_against_bids(
                &mut self.bids,
                &mut self.orders,
                &mut self.tape,
                &mut taker,
            ),
        };

        if !taker.is_filled() {
            self.rest(taker);
        }

        Ok(Submission { order_id, trades })
    }

    /// Cancel a resting order.
    ///
    /// Returns false when the id is unknown: never issued, already fully
    /// filled, or already cancelled. A second cancel of the same id is a
    /// no-op returning false.
    pub fn cancel(&mut self, order_id: OrderId) -> bool {
        let Some(order) = self.orders.get(order_id) else {
            return false;
        };
        let (price, side) = (order.price, order.side);

        match side {
            Side::BUY => self.bids.remove(order_id, price, &mut self.orders),
            Side::SELL => self.asks.remove(order_id, price, &mut self.orders),
        }

        let mut order = self
            .orders
            .remove(order_id)
            .expect("cancelled order vanished from index");
        order.cancel();
        true
    }

    /// Best bid price, if any buy orders are resting
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_bid()
    }

    /// Best ask price, if any sell orders are resting
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_ask()
    }

    /// Best ask minus best bid; zero unless both sides are populated
    pub fn spread(&self) -> Price {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask - bid,
            _ => Price::ZERO,
        }
    }

    /// Number of resting orders
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of distinct bid price levels
    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of distinct ask price levels
    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }

    /// Look up a resting order
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// The global tape: every trade this book has matched, in order
    pub fn trades(&self) -> &[Trade] {
        self.tape.all()
    }

    /// The most recent `limit` trades in match order
    pub fn recent_trades(&self, limit: usize) -> &[Trade] {
        self.tape.recent(limit)
    }

    /// Top N bid levels as (price, total quantity), best first
    pub fn bid_depth(&self, depth: usize) -> Vec<(Price, u64)> {
        self.bids.depth_snapshot(depth)
    }

    /// Top N ask levels as (price, total quantity), best first
    pub fn ask_depth(&self, depth: usize) -> Vec<(Price, u64)> {
        self.asks.depth_snapshot(depth)
    }

    /// Read-only top-of-book summary
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            spread: self.spread(),
            order_count: self.order_count(),
            bid_levels: self.bid_level_count(),
            ask_levels: self.ask_level_count(),
        }
    }

    /// Place an unfilled remainder as a maker at its limit price
    fn rest(&mut self, order: Order) {
        let (id, price, side) = (order.id, order.price, order.side);
        self.orders.insert(order);
        match side {
            Side::BUY => self.bids.insert(id, price, &mut self.orders),
            Side::SELL => self.asks.insert(id, price, &mut self.orders),
        }
    }

    /// Match an incoming buy against the ask side
    fn match_against_asks(
        asks: &mut AskBook,
        orders: &mut OrderIndex,
        tape: &mut TradeTape,
        taker: &mut Order,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !taker.is_filled() {
            let Some((level_price, level)) = asks.best_level_mut() else {
                break;
            };
            if !crossing::taker_crosses(taker.side, taker.price, level_price) {
                break;
            }

            Self::fill_level(level, level_price, orders, tape, taker, &mut trades);

            let exhausted = level.is_empty();
            if exhausted {
                asks.remove_level(level_price);
            }
        }

        trades
    }

    /// Match an incoming sell against the bid side
    fn match_against_bids(
        bids: &mut BidBook,
        orders: &mut OrderIndex,
        tape: &mut TradeTape,
        taker: &mut Order,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !taker.is_filled() {
            let Some((level_price, level)) = bids.best_level_mut() else {
                break;
            };
            if !crossing::taker_crosses(taker.side, taker.price, level_price) {
                break;
            }

            Self::fill_level(level, level_price, orders, tape, taker, &mut trades);

            let exhausted = level.is_empty();
            if exhausted {
                bids.remove_level(level_price);
            }
        }

        trades
    }

    /// Consume one price level FIFO-first until the taker or the level is
    /// exhausted. Execution price is the level's (maker's) price.
    fn fill_level(
        level: &mut PriceLevel,
        level_price: Price,
        orders: &mut OrderIndex,
        tape: &mut TradeTape,
        taker: &mut Order,
        trades: &mut Vec<Trade>,
    ) {
        while !taker.is_filled() {
            let Some(maker_id) = level.head() else {
                break;
            };

            let maker = orders
                .get_mut(maker_id)
                .expect("level head missing from order index");
            let fill = taker.remaining_quantity().min(maker.remaining_quantity());
            maker.fill(fill);
            let maker_filled = maker.is_filled();

            let (buyer, seller) = match taker.side {
                Side::BUY => (taker.id, maker_id),
                Side::SELL => (maker_id, taker.id),
            };
            let trade = tape.record(buyer, seller, level_price, fill, unix_nanos());

            taker.fill(fill);
            level.reduce(fill);

            // A zero-remaining maker must never be observable from any map
            if maker_filled {
                level.unlink(maker_id, orders);
                orders.remove(maker_id);
            }

            trades.push(trade);
        }
    }

    /// Walk every internal structure and assert the book's global
    /// invariants. Intended for tests and debugging.
    ///
    /// # Panics
    /// Panics on any violation; these are bugs, not runtime errors.
    pub fn check_invariants(&self) {
        let mut walked = 0usize;
        for (price, level) in self.bids.levels() {
            walked += Self::check_level(*price, Side::BUY, level, &self.orders);
        }
        for (price, level) in self.asks.levels() {
            walked += Self::check_level(*price, Side::SELL, level, &self.orders);
        }
        assert_eq!(
            walked,
            self.orders.len(),
            "order index count diverges from level membership"
        );

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            assert!(bid < ask, "book is crossed: bid {} >= ask {}", bid, ask);
        }
    }

    fn check_level(price: Price, side: Side, level: &PriceLevel, orders: &OrderIndex) -> usize {
        assert!(!level.is_empty(), "empty level retained in side map");
        assert_eq!(level.price(), price, "level keyed under the wrong price");

        let mut count = 0usize;
        let mut total = 0u64;
        let mut prev = None;
        let mut cursor = level.head();

        while let Some(id) = cursor {
            let node = orders
                .node(id)
                .expect("level references an order missing from the index");
            assert_eq!(node.order.price, price, "order resting at foreign price");
            assert_eq!(node.order.side, side, "order resting on the wrong side");
            assert_eq!(node.prev, prev, "corrupt FIFO linkage");
            assert!(
                !node.order.status.is_terminal(),
                "terminal order reachable from a level"
            );

            let remaining = node.order.remaining_quantity();
            assert!(!remaining.is_zero(), "zero-remaining order is resting");

            total += remaining.as_u64();
            count += 1;
            prev = Some(id);
            cursor = node.next;
        }

        assert_eq!(count, level.len(), "level length diverges from its queue");
        assert_eq!(
            total,
            level.total_quantity(),
            "level aggregate diverges from its orders"
        );
        count
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::OrderStatus;

    fn submit(book: &mut OrderBook, price: u64, quantity: u32, side: Side) -> Submission {
        let submission = book
            .submit(Price::new(price), Quantity::new(quantity), side)
            .unwrap();
        book.check_invariants();
        submission
    }

    #[test]
    fn test_rejects_zero_price_without_consuming_an_id() {
        let mut book = OrderBook::new();

        let err = book
            .submit(Price::ZERO, Quantity::new(10), Side::BUY)
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidPrice(_)));

        // The first accepted order still gets id 1
        let submission = submit(&mut book, 100, 10, Side::BUY);
        assert_eq!(submission.order_id, OrderId::new(1));
    }

    #[test]
    fn test_rejects_zero_quantity_without_consuming_an_id() {
        let mut book = OrderBook::new();

        let err = book
            .submit(Price::new(100), Quantity::zero(), Side::SELL)
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(_)));
        assert_eq!(book.order_count(), 0);
        assert!(book.trades().is_empty());
    }

    #[test]
    fn test_order_ids_are_monotonic_and_not_reset_by_cancel() {
        let mut book = OrderBook::new();

        let s1 = submit(&mut book, 100, 1, Side::BUY);
        let s2 = submit(&mut book, 101, 1, Side::BUY);
        assert_eq!(s1.order_id, OrderId::new(1));
        assert_eq!(s2.order_id, OrderId::new(2));

        assert!(book.cancel(s2.order_id));
        let s3 = submit(&mut book, 102, 1, Side::BUY);
        assert_eq!(s3.order_id, OrderId::new(3));
    }

    #[test]
    fn test_no_cross_both_sides_rest() {
        let mut book = OrderBook::new();

        let s1 = submit(&mut book, 100, 10, Side::BUY);
        assert_eq!(s1.order_id, OrderId::new(1));
        assert!(s1.trades.is_empty());

        let s2 = submit(&mut book, 105, 5, Side::SELL);
        assert_eq!(s2.order_id, OrderId::new(2));
        assert!(s2.trades.is_empty());

        assert_eq!(book.best_bid(), Some(Price::new(100)));
        assert_eq!(book.best_ask(), Some(Price::new(105)));
        assert_eq!(book.spread(), Price::new(5));
        assert_eq!(book.order_count(), 2);
    }

    #[test]
    fn test_taker_filled_maker_remains() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 10, Side::BUY);
        let s2 = submit(&mut book, 100, 4, Side::SELL);

        assert_eq!(s2.trades.len(), 1);
        let trade = &s2.trades[0];
        assert_eq!(trade.buyer_order_id, OrderId::new(1));
        assert_eq!(trade.seller_order_id, OrderId::new(2));
        assert_eq!(trade.price, Price::new(100));
        assert_eq!(trade.quantity, Quantity::new(4));

        assert_eq!(book.best_bid(), Some(Price::new(100)));
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.order_count(), 1);

        let maker = book.get(OrderId::new(1)).unwrap();
        assert_eq!(maker.remaining_quantity(), Quantity::new(6));
        assert_eq!(maker.status, OrderStatus::PartiallyFilled);

        // The fully filled taker never rested
        assert!(book.get(OrderId::new(2)).is_none());
    }

    #[test]
    fn test_price_improvement_executes_at_maker_price() {
        let mut book = OrderBook::new();

        submit(&mut book, 99, 5, Side::SELL);
        let s2 = submit(&mut book, 101, 5, Side::BUY);

        assert_eq!(s2.trades.len(), 1);
        let trade = &s2.trades[0];
        assert_eq!(trade.buyer_order_id, OrderId::new(2));
        assert_eq!(trade.seller_order_id, OrderId::new(1));
        assert_eq!(trade.price, Price::new(99));
        assert_eq!(trade.quantity, Quantity::new(5));

        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_price_time_priority_within_level() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 3, Side::SELL);
        submit(&mut book, 100, 4, Side::SELL);
        let s3 = submit(&mut book, 100, 5, Side::BUY);

        assert_eq!(s3.trades.len(), 2);
        assert_eq!(s3.trades[0].seller_order_id, OrderId::new(1));
        assert_eq!(s3.trades[0].quantity, Quantity::new(3));
        assert_eq!(s3.trades[1].seller_order_id, OrderId::new(2));
        assert_eq!(s3.trades[1].quantity, Quantity::new(2));
        assert!(s3.trades.iter().all(|t| t.buyer_order_id == OrderId::new(3)));

        let maker = book.get(OrderId::new(2)).unwrap();
        assert_eq!(maker.remaining_quantity(), Quantity::new(2));
        assert!(book.get(OrderId::new(1)).is_none());
        assert!(book.get(OrderId::new(3)).is_none());
    }

    #[test]
    fn test_taker_walks_levels_and_rests_remainder() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 2, Side::SELL);
        submit(&mut book, 101, 3, Side::SELL);
        submit(&mut book, 102, 10, Side::SELL);

        let s4 = submit(&mut book, 101, 6, Side::BUY);

        assert_eq!(s4.trades.len(), 2);
        assert_eq!(s4.trades[0].price, Price::new(100));
        assert_eq!(s4.trades[0].quantity, Quantity::new(2));
        assert_eq!(s4.trades[1].price, Price::new(101));
        assert_eq!(s4.trades[1].quantity, Quantity::new(3));

        // One unit rests as a bid at the taker's limit
        let rested = book.get(OrderId::new(4)).unwrap();
        assert_eq!(rested.remaining_quantity(), Quantity::new(1));
        assert_eq!(rested.status, OrderStatus::PartiallyFilled);

        assert_eq!(book.best_bid(), Some(Price::new(101)));
        assert_eq!(book.best_ask(), Some(Price::new(102)));

        // The 102 ask is untouched
        let untouched = book.get(OrderId::new(3)).unwrap();
        assert_eq!(untouched.remaining_quantity(), Quantity::new(10));
        assert_eq!(untouched.status, OrderStatus::New);
    }

    #[test]
    fn test_cancel_removes_empty_level_and_is_idempotent_false() {
        let mut book = OrderBook::new();

        let s1 = submit(&mut book, 100, 5, Side::BUY);

        assert!(book.cancel(s1.order_id));
        book.check_invariants();
        assert_eq!(book.bid_level_count(), 0);
        assert_eq!(book.order_count(), 0);

        // Second cancel of the same id returns false with no effect
        assert!(!book.cancel(s1.order_id));
        assert!(!book.cancel(OrderId::new(999)));
    }

    #[test]
    fn test_cancel_keeps_level_with_remaining_orders() {
        let mut book = OrderBook::new();

        let s1 = submit(&mut book, 100, 5, Side::SELL);
        submit(&mut book, 100, 7, Side::SELL);

        assert!(book.cancel(s1.order_id));
        book.check_invariants();
        assert_eq!(book.ask_level_count(), 1);
        assert_eq!(book.order_count(), 1);

        // Remaining maker is now first in line
        let s3 = submit(&mut book, 100, 7, Side::BUY);
        assert_eq!(s3.trades.len(), 1);
        assert_eq!(s3.trades[0].seller_order_id, OrderId::new(2));
    }

    #[test]
    fn test_cancelled_maker_cannot_trade() {
        let mut book = OrderBook::new();

        let s1 = submit(&mut book, 100, 5, Side::SELL);
        assert!(book.cancel(s1.order_id));

        let s2 = submit(&mut book, 100, 5, Side::BUY);
        assert!(s2.trades.is_empty());
        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn test_non_crossing_submission_rests() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 10, Side::BUY);
        let before = book.order_count();
        let s = submit(&mut book, 101, 5, Side::SELL);

        assert!(s.trades.is_empty());
        assert_eq!(book.order_count(), before + 1);
    }

    #[test]
    fn test_taker_within_liquidity_never_rests() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 4, Side::SELL);
        submit(&mut book, 101, 4, Side::SELL);

        let s = submit(&mut book, 101, 6, Side::BUY);
        let filled: u32 = s.trades.iter().map(|t| t.quantity.as_u32()).sum();

        assert_eq!(filled, 6);
        assert!(book.get(s.order_id).is_none());
        assert_eq!(book.best_bid(), None);
    }

    #[test]
    fn test_tape_is_concatenation_of_submission_trades() {
        let mut book = OrderBook::new();
        let mut expected = Vec::new();

        submit(&mut book, 100, 2, Side::SELL);
        submit(&mut book, 101, 3, Side::SELL);
        expected.extend(submit(&mut book, 101, 4, Side::BUY).trades);
        submit(&mut book, 99, 5, Side::BUY);
        expected.extend(submit(&mut book, 99, 2, Side::SELL).trades);

        assert_eq!(book.trades(), expected.as_slice());

        let sequences: Vec<u64> = book.trades().iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn test_snapshot_reports_counts_and_spread() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 10, Side::BUY);
        submit(&mut book, 99, 10, Side::BUY);
        submit(&mut book, 105, 5, Side::SELL);

        let snapshot = book.snapshot();
        assert_eq!(snapshot.best_bid, Some(Price::new(100)));
        assert_eq!(snapshot.best_ask, Some(Price::new(105)));
        assert_eq!(snapshot.spread, Price::new(5));
        assert_eq!(snapshot.order_count, 3);
        assert_eq!(snapshot.bid_levels, 2);
        assert_eq!(snapshot.ask_levels, 1);
    }

    #[test]
    fn test_depth_snapshots_track_levels() {
        let mut book = OrderBook::new();

        submit(&mut book, 100, 10, Side::BUY);
        submit(&mut book, 99, 4, Side::BUY);
        submit(&mut book, 105, 5, Side::SELL);

        assert_eq!(
            book.bid_depth(10),
            vec![(Price::new(100), 10), (Price::new(99), 4)]
        );
        assert_eq!(book.ask_depth(10), vec![(Price::new(105), 5)]);
    }

    #[test]
    fn test_recent_trades_returns_tail_of_tape() {
        let mut book = OrderBook::new();

        for _ in 0..4 {
            submit(&mut book, 100, 1, Side::SELL);
            submit(&mut book, 100, 1, Side::BUY);
        }

        assert_eq!(book.trades().len(), 4);
        let recent = book.recent_trades(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].sequence, 4);
    }
}
