use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use shared_storage::AppState;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/providers", get(handlers::list_providers))
        .route(
            "/providers/{provider_id}/slots",
            get(handlers::list_provider_slots).put(handlers::replace_provider_slots),
        )
        .with_state(state)
}
