use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use reservation_cell::router::{product_routes, reservation_routes};
use schedule_cell::router::schedule_routes;
use shared_storage::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Booking API is running!" }))
        .nest("/reservations", reservation_routes(state.clone()))
        .nest("/products", product_routes(state.clone()))
        .nest("/schedules", schedule_routes(state))
}
