#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CustomersRankedEvent {
    pub source_file: String,
    pub customer_count: usize,
    pub top_score: Option<u8>,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct OfferDispatchedEvent {
    pub notification_id: String,
    pub customer_id: String,
    pub kind: String,
    pub has_referral_link: bool,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReferralClickedEvent {
    pub click_id: String,
    pub customer_id: String,
    pub referral_link: String,
    pub timestamp: i64,
}
