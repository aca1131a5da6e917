use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar date with its remaining bookable time labels, in the order
/// the admin entered them. An entry with no labels is never persisted; the
/// date disappearing from the schedule is what "fully booked" looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

/// A provider's full slot set as stored in the schedules document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSchedule {
    pub provider_id: String,
    pub name: String,
    #[serde(default)]
    pub schedule: Vec<DaySlots>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Admin bulk-replace payload. `schedule_text` is one line per date:
/// `YYYY-MM-DD:HH:MM,HH:MM,...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceSlotsRequest {
    pub name: String,
    pub schedule_text: String,
}
