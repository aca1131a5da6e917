use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_storage::AppState;

use crate::error::ScheduleError;
use crate::models::ReplaceSlotsRequest;
use crate::services::parser::{format_schedule_text, parse_schedule_text};
use crate::services::SlotStoreService;

fn storage_error(err: ScheduleError) -> AppError {
    AppError::Storage(err.to_string())
}

pub async fn list_providers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let slots = SlotStoreService::new(Arc::clone(&state.store));
    let providers = slots.list_providers().await.map_err(storage_error)?;

    Ok(Json(json!({ "providers": providers })))
}

pub async fn list_provider_slots(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let slots = SlotStoreService::new(Arc::clone(&state.store));

    let schedule = slots.list_slots(&provider_id).await.map_err(storage_error)?;
    let name = slots
        .provider_name(&provider_id)
        .await
        .map_err(storage_error)?
        .unwrap_or_default();

    Ok(Json(json!({
        "provider_id": provider_id,
        "name": name,
        "schedule": schedule,
        "schedule_text": format_schedule_text(&schedule),
    })))
}

/// Admin bulk-replace of one provider's slot set from schedule text.
pub async fn replace_provider_slots(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    payload: Result<Json<ReplaceSlotsRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|err| AppError::BadRequest(err.body_text()))?;

    let slots = SlotStoreService::new(Arc::clone(&state.store));

    let schedule = parse_schedule_text(&request.schedule_text);
    slots
        .replace_slots(&provider_id, &request.name, schedule)
        .await
        .map_err(storage_error)?;

    let saved = slots.list_slots(&provider_id).await.map_err(storage_error)?;

    Ok(Json(json!({
        "success": true,
        "provider_id": provider_id,
        "name": request.name,
        "schedule": saved,
        "schedule_text": format_schedule_text(&saved),
    })))
}
