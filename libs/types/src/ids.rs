//! Identifier types for book entities.
//!
//! Order identifiers are assigned by the book itself: sequential from 1,
//! strictly monotonic, never reused and never reset by cancellation. The
//! numeric ordering therefore doubles as submission ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw identifier value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_ordering_follows_value() {
        assert!(OrderId::new(1) < OrderId::new(2));
        assert_eq!(OrderId::new(7), OrderId::from(7));
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_order_id_display() {
        assert_eq!(OrderId::new(1001).to_string(), "1001");
    }
}
