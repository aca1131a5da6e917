use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::Reservation;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Collaborator that receives confirmed reservations for delivery
/// (email/webhook). Invoked outside the atomic booking unit; a failure here
/// is logged and never rolls back the reservation.
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    async fn notify(&self, reservation: &Reservation) -> Result<(), NotifierError>;
}

/// Posts the reservation record as JSON to a configured endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ReservationNotifier for WebhookNotifier {
    async fn notify(&self, reservation: &Reservation) -> Result<(), NotifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(reservation)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Status(status));
        }

        debug!("Delivered reservation {} to webhook", reservation.id);
        Ok(())
    }
}

/// Used when no webhook endpoint is configured.
pub struct NullNotifier;

#[async_trait]
impl ReservationNotifier for NullNotifier {
    async fn notify(&self, reservation: &Reservation) -> Result<(), NotifierError> {
        debug!(
            "No webhook configured, skipping notification for reservation {}",
            reservation.id
        );
        Ok(())
    }
}
