//! Error taxonomy for order admission.
//!
//! Every engine error is a pre-admission validation failure: a rejected
//! submission consumes no order id and leaves no state behind. Unknown-order
//! cancellation is a boolean outcome, not an error, and internal invariant
//! violations are bugs surfaced as panics.

use thiserror::Error;

/// Validation errors raised before an order is admitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid side: {0}")]
    InvalidSide(String),
}
