use crate::error::AppError;
use anyhow::anyhow;
use matching_engine::OrderBook;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state.
///
/// The book is a single mutation domain: one exclusive lock serializes
/// submits, cancels and snapshot reads, as the engine's contract requires.
#[derive(Clone)]
pub struct AppState {
    book: Arc<Mutex<OrderBook>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            book: Arc::new(Mutex::new(OrderBook::new())),
        }
    }

    /// Acquire the book for the duration of one engine call.
    pub fn book(&self) -> Result<MutexGuard<'_, OrderBook>, AppError> {
        self.book
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("order book mutex poisoned")))
    }
}
