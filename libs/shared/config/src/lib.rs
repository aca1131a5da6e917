use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_dir: String,
    pub default_provider_id: String,
    pub reservation_webhook_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            storage_dir: env::var("BOOKING_STORAGE_DIR")
                .unwrap_or_else(|_| {
                    warn!("BOOKING_STORAGE_DIR not set, using ./storage");
                    "./storage".to_string()
                }),
            default_provider_id: env::var("BOOKING_DEFAULT_PROVIDER_ID")
                .unwrap_or_else(|_| String::new()),
            reservation_webhook_url: env::var("RESERVATION_WEBHOOK_URL")
                .unwrap_or_else(|_| {
                    warn!("RESERVATION_WEBHOOK_URL not set, reservation webhook disabled");
                    String::new()
                }),
        }
    }

    /// Fallback provider for slot-requiring products that name no provider.
    /// An empty value means there is no fallback.
    pub fn default_provider(&self) -> Option<&str> {
        if self.default_provider_id.is_empty() {
            None
        } else {
            Some(&self.default_provider_id)
        }
    }

    pub fn is_webhook_configured(&self) -> bool {
        !self.reservation_webhook_url.is_empty()
    }
}
