use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use schedule_cell::error::ScheduleError;
use schedule_cell::services::SlotStoreService;
use shared_storage::AppState;

use crate::error::ReservationError;
use crate::models::{BookingRequest, Product, Reservation, SchedulePolicy, SlotClaim};
use crate::services::catalog::ProductCatalog;
use crate::services::ledger::ReservationLedger;
use crate::services::notifier::{NullNotifier, ReservationNotifier, WebhookNotifier};

/// Orchestrates a booking: validates the request against the product's
/// schedule policy, consumes the slot through the slot store's exclusion
/// gate, appends the reservation to the ledger, and hands the confirmed
/// record to the notifier best-effort.
#[derive(Clone)]
pub struct BookingService {
    catalog: ProductCatalog,
    slots: SlotStoreService,
    ledger: ReservationLedger,
    notifier: Arc<dyn ReservationNotifier>,
    default_provider_id: Option<String>,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        let notifier: Arc<dyn ReservationNotifier> = if state.config.is_webhook_configured() {
            Arc::new(WebhookNotifier::new(
                state.config.reservation_webhook_url.clone(),
            ))
        } else {
            Arc::new(NullNotifier)
        };
        Self::with_notifier(state, notifier)
    }

    pub fn with_notifier(state: &AppState, notifier: Arc<dyn ReservationNotifier>) -> Self {
        Self {
            catalog: ProductCatalog::new(Arc::clone(&state.store)),
            slots: SlotStoreService::new(Arc::clone(&state.store)),
            ledger: ReservationLedger::new(Arc::clone(&state.store)),
            notifier,
            default_provider_id: state.config.default_provider().map(String::from),
        }
    }

    pub async fn book(&self, request: BookingRequest) -> Result<Reservation, ReservationError> {
        if request.product_id.trim().is_empty() {
            let mut missing = vec!["product_id".to_string()];
            missing.extend(missing_customer_fields(&request));
            return Err(ReservationError::Validation(missing));
        }

        let product = self
            .catalog
            .get(&request.product_id)
            .await?
            .ok_or_else(|| ReservationError::ProductNotFound(request.product_id.clone()))?;

        let policy = resolve_schedule_policy(
            &product,
            request.provider_id.as_deref(),
            self.default_provider_id.as_deref(),
        );
        let claim = validate_booking(&request, &policy).map_err(ReservationError::Validation)?;

        // Name lookup happens before consumption so a storage error here
        // cannot strand a consumed slot.
        let provider_name = match &claim {
            Some(claim) => self
                .slots
                .provider_name(&claim.provider_id)
                .await
                .map_err(map_schedule_error)?,
            None => None,
        };

        let reservation = Reservation {
            id: Uuid::new_v4(),
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            provider_id: claim.as_ref().map(|c| c.provider_id.clone()),
            provider_name,
            date: claim.as_ref().map(|c| c.date),
            time_slot: claim.as_ref().map(|c| c.time_slot.clone()),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            birthday: request.birthday,
            birth_time: request.birth_time,
            birth_place: request.birth_place,
            payment_method: request.payment_method,
            notes: request.notes,
            created_at: Utc::now(),
        };

        // A dropped request future is cancelled at its next await point, so
        // the consume + append + compensate unit runs on its own task and a
        // client abandoning the connection cannot interrupt it halfway.
        let commit = tokio::spawn(commit_reservation(
            self.slots.clone(),
            self.ledger.clone(),
            claim,
            reservation.clone(),
        ));
        match commit.await {
            Ok(outcome) => outcome?,
            Err(join_err) => std::panic::resume_unwind(join_err.into_panic()),
        }

        info!(
            "Reservation {} confirmed for product {} (provider {:?}, slot {:?} {:?})",
            reservation.id,
            reservation.product_id,
            reservation.provider_id,
            reservation.date,
            reservation.time_slot
        );

        if let Err(err) = self.notifier.notify(&reservation).await {
            warn!(
                "Reservation {} confirmed but notification failed: {}",
                reservation.id, err
            );
        }

        Ok(reservation)
    }

    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.ledger.list().await?)
    }
}

/// The atomic unit: consume the claimed slot, append the reservation, and
/// compensate if the append fails after consumption succeeded.
async fn commit_reservation(
    slots: SlotStoreService,
    ledger: ReservationLedger,
    claim: Option<SlotClaim>,
    reservation: Reservation,
) -> Result<(), ReservationError> {
    if let Some(claim) = &claim {
        slots
            .consume_slot(&claim.provider_id, claim.date, &claim.time_slot)
            .await
            .map_err(map_schedule_error)?;
    }

    if let Err(append_err) = ledger.append(&reservation).await {
        error!(
            "Ledger append failed for reservation {} (product {}, provider {:?}, slot {:?} {:?}): {}",
            reservation.id,
            reservation.product_id,
            reservation.provider_id,
            reservation.date,
            reservation.time_slot,
            append_err
        );

        // Compensate: the consumed slot must not stay unavailable with no
        // reservation backing it.
        if let Some(claim) = &claim {
            if let Err(restore_err) = slots
                .restore_slot(&claim.provider_id, claim.date, &claim.time_slot)
                .await
            {
                error!(
                    "Slot restore failed for provider {} at {} {}; manual reconciliation required: {}",
                    claim.provider_id, claim.date, claim.time_slot, restore_err
                );
            }
        }

        return Err(ReservationError::Storage(append_err));
    }

    Ok(())
}

fn map_schedule_error(err: ScheduleError) -> ReservationError {
    match err {
        ScheduleError::SlotNotFound {
            provider_id,
            date,
            time,
        } => {
            info!(
                "Slot {} {} for provider {} already taken",
                date, time, provider_id
            );
            ReservationError::SlotUnavailable {
                provider_id,
                date,
                time,
            }
        }
        ScheduleError::Storage(source) => ReservationError::Storage(source),
    }
}

/// Resolve the product's schedule policy once per request. Provider
/// resolution order: explicit request value, then the product's assigned
/// provider, then the configured fallback. An unresolvable provider for a
/// slot-requiring product surfaces as a validation error on `provider_id`.
fn resolve_schedule_policy(
    product: &Product,
    requested_provider: Option<&str>,
    default_provider: Option<&str>,
) -> SchedulePolicy {
    if !product.is_schedule_required() {
        return SchedulePolicy::NoneRequired;
    }

    let provider_id = requested_provider
        .filter(|id| !id.trim().is_empty())
        .or(product.provider_id.as_deref())
        .or(default_provider)
        .unwrap_or_default();

    SchedulePolicy::RequiresSlot {
        provider_id: provider_id.to_string(),
    }
}

fn missing_customer_fields(request: &BookingRequest) -> Vec<String> {
    let mut missing = Vec::new();
    if request.name.trim().is_empty() {
        missing.push("name".to_string());
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        missing.push("email".to_string());
    }
    missing
}

/// Validation pipeline: collects every missing or invalid field rather than
/// failing on the first one. Returns the slot claim to consume, or `None`
/// when the policy requires no scheduling.
fn validate_booking(
    request: &BookingRequest,
    policy: &SchedulePolicy,
) -> Result<Option<SlotClaim>, Vec<String>> {
    let mut missing = missing_customer_fields(request);

    let claim = match policy {
        SchedulePolicy::NoneRequired => None,
        SchedulePolicy::RequiresSlot { provider_id } => {
            if provider_id.is_empty() {
                missing.push("provider_id".to_string());
            }
            if request.date.is_none() {
                missing.push("date".to_string());
            }
            let time_slot = request
                .time_slot
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty());
            if time_slot.is_none() {
                missing.push("time_slot".to_string());
            }

            match (request.date, time_slot) {
                (Some(date), Some(time_slot)) if missing.is_empty() => Some(SlotClaim {
                    provider_id: provider_id.clone(),
                    date,
                    time_slot: time_slot.to_string(),
                }),
                _ => None,
            }
        }
    };

    if missing.is_empty() {
        Ok(claim)
    } else {
        Err(missing)
    }
}
