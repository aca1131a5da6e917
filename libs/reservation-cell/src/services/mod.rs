pub mod booking;
pub mod catalog;
pub mod ledger;
pub mod notifier;

pub use booking::BookingService;
pub use catalog::ProductCatalog;
pub use ledger::ReservationLedger;
pub use notifier::{NullNotifier, ReservationNotifier, WebhookNotifier};
