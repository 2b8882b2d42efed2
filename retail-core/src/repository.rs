use async_trait::async_trait;
use crate::notification::{Notification, ReferralClick};

/// Repository trait for the shared notification log
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Read the full collection, push the new entry, write it back wholesale.
    async fn append(
        &self,
        notification: &Notification,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Exact-id filter over the collection, insertion order preserved.
    async fn list_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Notification>, Box<dyn std::error::Error + Send + Sync>>;

    /// Flip `read` to true for a matching id. Unknown ids are a silent no-op.
    async fn mark_read(
        &self,
        notification_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for referral click tracking
#[async_trait]
pub trait ReferralClickRepository: Send + Sync {
    async fn append(
        &self,
        click: &ReferralClick,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list(
        &self,
    ) -> Result<Vec<ReferralClick>, Box<dyn std::error::Error + Send + Sync>>;
}
