use serde::{Deserialize, Serialize};

/// A customer as the console sees it.
///
/// The ranking attributes are only populated for customers produced by the
/// loyalty pipeline (or the demo dataset); directory entries carry just the
/// identity fields. Customers are immutable once created and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_purchased_product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_offer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_purchases: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_order_value: Option<f64>,
}

impl Customer {
    /// A directory entry: identity fields only.
    pub fn basic(id: &str, name: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            loyalty_score: None,
            top_purchased_product: None,
            recommended_offer: None,
            total_purchases: None,
            average_order_value: None,
        }
    }

    /// Whether this customer carries the pipeline's ranking attributes.
    pub fn is_ranked(&self) -> bool {
        self.loyalty_score.is_some()
    }
}
