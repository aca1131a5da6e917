use chrono::NaiveDate;
use thiserror::Error;

use shared_storage::StorageError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("No bookable slot at {date} {time} for provider {provider_id}")]
    SlotNotFound {
        provider_id: String,
        date: NaiveDate,
        time: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
