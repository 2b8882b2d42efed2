use chrono::Utc;
use std::sync::Arc;

use retail_core::notification::Notification;
use retail_core::repository::NotificationRepository;
use retail_shared::models::events::OfferDispatchedEvent;
use retail_shared::pii::Masked;

use crate::composer::NotificationDraft;
use crate::events::OfferTelemetry;
use crate::transport::{EmailTransport, OutboundEmail};

/// Subject line of the simulated offer email.
pub const EMAIL_SUBJECT: &str = "Special Offer Just for You!";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Store operation failed: {0}")]
    Store(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Orchestrates sending an offer: persist the notification, then simulate
/// delivery. Either every step completes or the dispatch failed; there is
/// no partial-success state.
pub struct DispatchService {
    notifications: Arc<dyn NotificationRepository>,
    transport: Arc<dyn EmailTransport>,
    telemetry: OfferTelemetry,
}

impl DispatchService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        transport: Arc<dyn EmailTransport>,
    ) -> Self {
        Self {
            notifications,
            transport,
            telemetry: OfferTelemetry::new(),
        }
    }

    pub async fn dispatch(&self, draft: NotificationDraft) -> Result<Notification, DispatchError> {
        // 1. Assign identity and timestamp
        let now = Utc::now();
        let notification = Notification {
            id: now.timestamp_millis().to_string(),
            customer_id: draft.customer_id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            referral_link: draft.referral_link,
            loyalty_score: draft.loyalty_score,
            sent_at: now,
            read: false,
        };

        // 2. Persist; a store failure fails the whole dispatch
        self.notifications
            .append(&notification)
            .await
            .map_err(|e| DispatchError::Store(e.to_string()))?;

        // 3. Simulated email when a referral link is attached
        if let Some(link) = &notification.referral_link {
            let email = OutboundEmail {
                to: Masked(draft.to_email),
                subject: EMAIL_SUBJECT.to_string(),
                body: format!(
                    "{}\n\nUse your referral link: {}",
                    notification.message, link
                ),
                referral_link: Some(link.clone()),
            };
            self.transport
                .send(&email)
                .await
                .map_err(|e| DispatchError::Delivery(e.to_string()))?;
        }

        // 4. Telemetry
        self.telemetry.log_offer_dispatched(OfferDispatchedEvent {
            notification_id: notification.id.clone(),
            customer_id: notification.customer_id.clone(),
            kind: notification.kind.as_str().to_string(),
            has_referral_link: notification.referral_link.is_some(),
            timestamp: now.timestamp(),
        });

        Ok(notification)
    }
}
