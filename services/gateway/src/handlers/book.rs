use crate::error::AppError;
use crate::models::{OrderBookResponse, StatsResponse, TradeView, TradesResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Levels shown per side in the /orderbook depth view
const DEPTH: usize = 10;
/// Trades returned by /trades
const TAPE_LIMIT: usize = 100;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /orderbook
///
/// Top of book in dollars (0.0 sentinel for an empty side) plus per-side
/// depth.
pub async fn orderbook(State(state): State<AppState>) -> Result<Json<OrderBookResponse>, AppError> {
    let book = state.book()?;
    let snapshot = book.snapshot();

    Ok(Json(OrderBookResponse {
        best_bid: snapshot.best_bid.map(|p| p.to_dollars()).unwrap_or(0.0),
        best_ask: snapshot.best_ask.map(|p| p.to_dollars()).unwrap_or(0.0),
        spread: snapshot.spread.to_dollars(),
        order_count: snapshot.order_count,
        bid_levels: snapshot.bid_levels,
        ask_levels: snapshot.ask_levels,
        bids: book.bid_depth(DEPTH).into_iter().map(Into::into).collect(),
        asks: book.ask_depth(DEPTH).into_iter().map(Into::into).collect(),
    }))
}

/// GET /stats
///
/// Top of book plus the mid price, or null when either side is empty.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let book = state.book()?;
    let snapshot = book.snapshot();

    let mid_price = match (snapshot.best_bid, snapshot.best_ask) {
        (Some(bid), Some(ask)) => Some((bid.as_u64() + ask.as_u64()) as f64 / 200.0),
        _ => None,
    };

    Ok(Json(StatsResponse {
        total_orders: snapshot.order_count,
        bid_levels: snapshot.bid_levels,
        ask_levels: snapshot.ask_levels,
        best_bid: snapshot.best_bid.map(|p| p.to_dollars()).unwrap_or(0.0),
        best_ask: snapshot.best_ask.map(|p| p.to_dollars()).unwrap_or(0.0),
        spread: snapshot.spread.to_dollars(),
        mid_price,
    }))
}

/// GET /trades
///
/// The most recent tape entries in match order.
pub async fn trades(State(state): State<AppState>) -> Result<Json<TradesResponse>, AppError> {
    let book = state.book()?;
    let recent = book.recent_trades(TAPE_LIMIT);

    Ok(Json(TradesResponse {
        count: recent.len(),
        trades: recent.iter().map(TradeView::from).collect(),
    }))
}
