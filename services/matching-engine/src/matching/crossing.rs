//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// A buy matches a sell when the bid price is at or above the ask price.
fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming taker order crosses a resting price level
pub fn taker_crosses(taker_side: Side, taker_price: Price, resting_price: Price) -> bool {
    match taker_side {
        Side::BUY => can_match(taker_price, resting_price),
        Side::SELL => can_match(resting_price, taker_price),
    }
}
