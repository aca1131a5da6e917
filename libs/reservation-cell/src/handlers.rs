use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_storage::AppState;

use crate::error::ReservationError;
use crate::models::BookingRequest;
use crate::services::{BookingService, ProductCatalog};

fn map_error(err: ReservationError) -> AppError {
    match err {
        ReservationError::Validation(fields) => AppError::Validation(fields),
        ReservationError::ProductNotFound(id) => {
            AppError::NotFound(format!("Product not found: {id}"))
        }
        ReservationError::SlotUnavailable { .. } => AppError::Conflict(
            "Requested slot is no longer available, please choose another".to_string(),
        ),
        ReservationError::Storage(source) => AppError::Storage(source.to_string()),
    }
}

#[axum::debug_handler]
pub async fn book_reservation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|err| AppError::BadRequest(err.body_text()))?;

    let service = BookingService::new(&state);
    let reservation = service.book(request).await.map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "reservation": reservation,
    })))
}

/// Audit/export view of the ledger.
#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);
    let reservations = service.list_reservations().await.map_err(map_error)?;

    Ok(Json(json!({ "reservations": reservations })))
}

#[axum::debug_handler]
pub async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let catalog = ProductCatalog::new(Arc::clone(&state.store));
    let products = catalog
        .list()
        .await
        .map_err(|err| AppError::Storage(err.to_string()))?;

    Ok(Json(json!({ "products": products })))
}
