use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE RESERVATION MODELS
// ==============================================================================

/// A confirmed reservation. Write-once: the ledger never updates or deletes
/// an appended record. `provider_id`/`date`/`time_slot` are absent together
/// for products that do not require scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub product_id: String,
    pub product_title: String,
    pub provider_id: Option<String>,
    pub provider_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The flat field set supplied by the booking form. Required-ness depends on
/// the product's schedule policy and is enforced by the validation pipeline,
/// not by deserialization, so one response can list every missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ==============================================================================
// PRODUCT AND SCHEDULE POLICY
// ==============================================================================

/// Catalog entry as stored in the products document. Catalog CRUD lives
/// elsewhere; this cell only reads it to resolve the schedule policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub requires_schedule: Option<bool>,
    #[serde(default)]
    pub provider_id: Option<String>,
}

impl Product {
    /// A missing flag means scheduling is required.
    pub fn is_schedule_required(&self) -> bool {
        self.requires_schedule.unwrap_or(true)
    }
}

/// Resolved once per booking request instead of re-checking product flags at
/// every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulePolicy {
    NoneRequired,
    RequiresSlot { provider_id: String },
}

/// The exact slot a validated schedule-bound booking will consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotClaim {
    pub provider_id: String,
    pub date: NaiveDate,
    pub time_slot: String,
}
