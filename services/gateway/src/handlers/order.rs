use crate::error::AppError;
use crate::models::{self, CancelResponse, PlaceOrderResponse, TradeView};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

/// POST /order
///
/// Validates the body, converts dollars to cents, and submits to the book.
/// The response carries the new order's id, the resulting resting order
/// count, and every trade this submission produced.
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PlaceOrderResponse>, AppError> {
    let request = models::PlaceOrder::from_json(&body)?;

    let mut book = state.book()?;
    let submission = book
        .submit(request.price, request.quantity, request.side)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::debug!(
        order_id = submission.order_id.as_u64(),
        trades = submission.trades.len(),
        "order accepted"
    );

    Ok(Json(PlaceOrderResponse {
        status: "success",
        order_id: submission.order_id.as_u64(),
        order_count: book.order_count(),
        trades: submission.trades.iter().map(TradeView::from).collect(),
    }))
}

/// DELETE /order
///
/// Body: `{"order_id": <uint>}`. 404 when the id is unknown, already
/// filled, or already cancelled.
pub async fn cancel_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<CancelResponse>, AppError> {
    let order_id = models::parse_cancel(&body)?;

    let mut book = state.book()?;
    if book.cancel(order_id) {
        Ok(Json(CancelResponse {
            status: "cancelled",
            order_id: order_id.as_u64(),
        }))
    } else {
        Err(AppError::NotFound(format!("Order not found: {}", order_id)))
    }
}
