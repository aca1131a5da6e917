use chrono::NaiveDate;
use thiserror::Error;

use shared_storage::StorageError;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Validation failed: missing or invalid fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Slot {date} {time} for provider {provider_id} is no longer available")]
    SlotUnavailable {
        provider_id: String,
        date: NaiveDate,
        time: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
