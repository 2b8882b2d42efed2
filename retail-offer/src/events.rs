use tracing::info;

use retail_shared::models::events::{OfferDispatchedEvent, ReferralClickedEvent};

/// Telemetry sink for the offer workflow.
///
/// Events are structured-logged; there is no external bus behind this
/// console, so the log stream is the telemetry pipeline.
#[derive(Default)]
pub struct OfferTelemetry;

impl OfferTelemetry {
    pub fn new() -> Self {
        Self
    }

    pub fn log_offer_dispatched(&self, event: OfferDispatchedEvent) {
        info!(
            target: "retail_telemetry",
            notification_id = %event.notification_id,
            customer_id = %event.customer_id,
            kind = %event.kind,
            has_referral_link = event.has_referral_link,
            timestamp = event.timestamp,
            "offer_dispatched"
        );
    }

    pub fn log_referral_clicked(&self, event: ReferralClickedEvent) {
        info!(
            target: "retail_telemetry",
            click_id = %event.click_id,
            customer_id = %event.customer_id,
            referral_link = %event.referral_link,
            timestamp = event.timestamp,
            "referral_clicked"
        );
    }
}
