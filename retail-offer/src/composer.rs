use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use retail_catalog::{Customer, CustomerDirectory};
use retail_core::notification::OfferKind;

use crate::referral::ReferralLinkGenerator;

/// Title used for every auto-suggested offer.
pub const AUTO_OFFER_TITLE: &str = "Exclusive Offer Just for You!";

/// Operator input for a manual offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualOfferRequest {
    pub customer_id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub referral_link: Option<String>,
}

/// A fully formed notification that has not been persisted yet, plus the
/// destination for the simulated send.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub customer_id: String,
    pub kind: OfferKind,
    pub title: String,
    pub message: String,
    pub referral_link: Option<String>,
    pub loyalty_score: Option<u8>,
    pub to_email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// Required operator input is missing; nothing gets dispatched.
    #[error("Missing information: {0}")]
    MissingInformation(&'static str),
}

/// Builds notification drafts from ranked customers or operator input.
pub struct OfferComposer {
    referral: ReferralLinkGenerator,
    directory: Arc<CustomerDirectory>,
}

impl OfferComposer {
    pub fn new(referral: ReferralLinkGenerator, directory: Arc<CustomerDirectory>) -> Self {
        Self { referral, directory }
    }

    /// Auto mode: the message is the customer's recommended offer, the link
    /// is quick-generated, and the loyalty score travels as a snapshot.
    pub fn compose_auto(&self, customer: &Customer) -> Result<NotificationDraft, ComposeError> {
        if customer.id.trim().is_empty() {
            return Err(ComposeError::MissingInformation("customer"));
        }
        let offer = customer
            .recommended_offer
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .ok_or(ComposeError::MissingInformation("recommended offer"))?;

        Ok(NotificationDraft {
            customer_id: customer.id.clone(),
            kind: OfferKind::AutoOffer,
            title: AUTO_OFFER_TITLE.to_string(),
            message: offer.to_string(),
            referral_link: Some(self.referral.quick(&customer.id, Utc::now())),
            loyalty_score: customer.loyalty_score,
            to_email: customer.email.clone(),
        })
    }

    /// Manual mode: customer id, title and message are required; the
    /// referral link is generated when the operator left it empty.
    pub fn compose_manual(
        &self,
        request: ManualOfferRequest,
    ) -> Result<NotificationDraft, ComposeError> {
        if request.customer_id.trim().is_empty() {
            return Err(ComposeError::MissingInformation("customer"));
        }
        if request.title.trim().is_empty() {
            return Err(ComposeError::MissingInformation("title"));
        }
        if request.message.trim().is_empty() {
            return Err(ComposeError::MissingInformation("message"));
        }

        let referral_link = request
            .referral_link
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.referral.quick(&request.customer_id, Utc::now()));

        // Customer ids are never referentially validated; unknown ids get
        // the conventional fallback address.
        let to_email = self
            .directory
            .find(&request.customer_id)
            .map(|c| c.email.clone())
            .unwrap_or_else(|| format!("{}@email.com", request.customer_id));

        Ok(NotificationDraft {
            customer_id: request.customer_id,
            kind: OfferKind::ManualOffer,
            title: request.title,
            message: request.message,
            referral_link: Some(referral_link),
            loyalty_score: None,
            to_email,
        })
    }
}
