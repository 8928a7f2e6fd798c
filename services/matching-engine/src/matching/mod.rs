//! Matching logic module
//!
//! Crossing detection and the global trade tape.

pub mod crossing;
pub mod tape;

pub use tape::TradeTape;
