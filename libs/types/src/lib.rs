//! Core domain types for the limit order book.
//!
//! This library provides the type vocabulary shared by the matching engine
//! and the HTTP gateway: integer minor-unit numerics, order lifecycle types,
//! trade records and the error taxonomy.
//!
//! # Modules
//! - `ids`: order identifiers
//! - `numeric`: integer minor-unit types (Price, Quantity)
//! - `order`: order lifecycle types
//! - `trade`: trade records
//! - `errors`: error taxonomy
//! - `time`: wall-clock helpers

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod time;
pub mod trade;
