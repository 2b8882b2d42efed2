use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Discriminates how an offer notification was produced.
///
/// Consumers match on this instead of inspecting a free-form string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OfferKind {
    #[serde(rename = "auto-offer")]
    AutoOffer,
    #[serde(rename = "manual-offer")]
    ManualOffer,
}

impl OfferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferKind::AutoOffer => "auto-offer",
            OfferKind::ManualOffer => "manual-offer",
        }
    }
}

/// An offer notification appended to the shared customer log.
///
/// The id is derived from the dispatch time in milliseconds and is not
/// guaranteed collision-free. After creation only `read` may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub customer_id: String,
    pub kind: OfferKind,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_score: Option<u8>,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// A tracked click on a referral link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralClick {
    pub id: String,
    pub referral_link: String,
    pub customer_id: String,
    pub clicked_at: DateTime<Utc>,
    /// Reserved: written false on every click, flipped by a purchase event
    /// that lives outside this system.
    pub converted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_wire_format_is_camel_case_with_kebab_kind() {
        let notification = Notification {
            id: "1718000000000".to_string(),
            customer_id: "1".to_string(),
            kind: OfferKind::AutoOffer,
            title: "Exclusive Offer Just for You!".to_string(),
            message: "25% off next purchase + Free shipping".to_string(),
            referral_link: Some("https://smartretailer.com/refer/1/1718000000000".to_string()),
            loyalty_score: Some(95),
            sent_at: Utc::now(),
            read: false,
        };

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["customerId"], "1");
        assert_eq!(value["kind"], "auto-offer");
        assert_eq!(value["loyaltyScore"], 95);
        assert_eq!(value["read"], false);
        assert!(value["referralLink"].as_str().unwrap().starts_with("https://"));
    }

    #[test]
    fn kind_round_trips_through_serde() {
        let kind: OfferKind = serde_json::from_str("\"manual-offer\"").unwrap();
        assert_eq!(kind, OfferKind::ManualOffer);
        assert_eq!(kind.as_str(), "manual-offer");
    }
}
