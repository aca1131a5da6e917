use std::sync::Arc;

use tracing::debug;

use shared_storage::{DocumentStore, StorageError};

use crate::models::Reservation;

pub const RESERVATIONS_DOC: &str = "reservations";

/// Durable append-only log of confirmed reservations. Prior entries are
/// never rewritten or deleted; `list` exists for audit and export.
#[derive(Clone)]
pub struct ReservationLedger {
    store: Arc<DocumentStore>,
}

impl ReservationLedger {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn append(&self, reservation: &Reservation) -> Result<(), StorageError> {
        let record = reservation.clone();
        self.store
            .update::<Vec<Reservation>, _>(RESERVATIONS_DOC, move |all| {
                all.push(record);
            })
            .await?;

        debug!("Appended reservation {} to ledger", reservation.id);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, StorageError> {
        self.store.read(RESERVATIONS_DOC).await
    }
}
