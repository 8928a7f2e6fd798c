//! Matching Engine
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! The engine is a synchronous state machine: `submit` and `cancel` are the
//! only mutators, nothing blocks or performs I/O, and callers are expected
//! to serialize access.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Execution price is always the resting (maker) order's price
//! - Aggregate level quantity equals the sum of its orders' remainders
//! - Terminal orders are unreachable from every book structure

pub mod book;
pub mod engine;
pub mod matching;

pub use engine::{BookSnapshot, OrderBook, Submission};
