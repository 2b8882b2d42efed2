use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use retail_shared::pii::Masked;
use retail_store::app_config::DeliveryConfig;

/// The simulated outbound email. It never leaves the process.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: Masked<String>,
    pub subject: String,
    pub body: String,
    pub referral_link: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Outbound boundary. Implementations resolve success or failure; they do
/// not panic through this interface.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError>;
}

/// Waits the configured simulated latency, then logs the send.
pub struct LoggingEmailTransport {
    delay: Duration,
}

impl LoggingEmailTransport {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.simulated_delay_ms),
        }
    }
}

#[async_trait]
impl EmailTransport for LoggingEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError> {
        tokio::time::sleep(self.delay).await;
        info!(
            to = %email.to.redacted_email(),
            subject = %email.subject,
            referral_link = ?email.referral_link,
            "email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_transport_always_resolves_ok() {
        let transport = LoggingEmailTransport::new(DeliveryConfig {
            simulated_delay_ms: 0,
        });
        let email = OutboundEmail {
            to: Masked("sarah.johnson@email.com".to_string()),
            subject: "Special Offer Just for You!".to_string(),
            body: "Enjoy 10% off".to_string(),
            referral_link: None,
        };
        assert!(transport.send(&email).await.is_ok());
    }

    #[test]
    fn recipient_is_masked_in_debug_output() {
        let email = OutboundEmail {
            to: Masked("sarah.johnson@email.com".to_string()),
            subject: "Special Offer Just for You!".to_string(),
            body: "body".to_string(),
            referral_link: None,
        };
        let debugged = format!("{:?}", email);
        assert!(!debugged.contains("sarah.johnson"));
        assert!(debugged.contains("********"));
    }
}
