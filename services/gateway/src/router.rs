use crate::handlers::{book, order};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(book::health))
        .route("/order", post(order::place_order).delete(order::cancel_order))
        .route("/orderbook", get(book::orderbook))
        .route("/stats", get(book::stats))
        .route("/trades", get(book::trades))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
