use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_storage::AppState;

use crate::handlers;

pub fn reservation_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::book_reservation).get(handlers::list_reservations),
        )
        .with_state(state)
}

pub fn product_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_products))
        .with_state(state)
}
