//! Integer minor-unit types for prices and quantities.
//!
//! Prices are carried as whole minor currency units (cents). The decimal
//! dollar representation exists only at the HTTP boundary; nothing inside
//! the engine ever touches floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Minor units per major currency unit (cents per dollar).
pub const MINOR_UNITS_PER_DOLLAR: u64 = 100;

/// Limit price in integer minor units.
///
/// A zero price is representable (it is the empty-book sentinel and the
/// spread of a one-sided book) but is rejected at order admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero price, used as the empty-side sentinel.
    pub const ZERO: Price = Price(0);

    /// Wrap a raw minor-unit value.
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Convert a decimal dollar amount, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Self {
        Self((dollars * MINOR_UNITS_PER_DOLLAR as f64).round() as u64)
    }

    /// Render as decimal dollars for the wire.
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_DOLLAR as f64
    }

    /// Get the raw minor-unit value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check whether the price is the zero sentinel.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).expect("price overflow"))
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "Price subtraction would result in negative");
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order quantity in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Wrap a raw quantity value.
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// Zero quantity (the initial filled quantity of a new order).
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw quantity value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Widen for aggregate sums that may exceed `u32`.
    pub const fn as_u64(&self) -> u64 {
        self.0 as u64
    }

    /// Check if the quantity is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).expect("quantity overflow"))
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(
            self.0 >= rhs.0,
            "Quantity subtraction would result in negative"
        );
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
