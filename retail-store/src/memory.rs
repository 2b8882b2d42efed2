use async_trait::async_trait;
use std::sync::Mutex;

use retail_core::notification::{Notification, ReferralClick};
use retail_core::repository::{NotificationRepository, ReferralClickRepository};
use retail_core::CoreError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// In-memory backend with the same wholesale read/replace semantics as the
/// key-value store. Used by tests and demo runs that have no Redis.
#[derive(Default)]
pub struct MemoryStore {
    notifications: Mutex<Vec<Notification>>,
    clicks: Mutex<Vec<ReferralClick>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn append(&self, notification: &Notification) -> Result<(), BoxError> {
        let mut all = self.notifications.lock().map_err(|_| CoreError::StoreError("notification log mutex poisoned".to_string()))?;
        all.push(notification.clone());
        Ok(())
    }

    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Notification>, BoxError> {
        let all = self.notifications.lock().map_err(|_| CoreError::StoreError("notification log mutex poisoned".to_string()))?;
        Ok(all.iter().filter(|n| n.customer_id == customer_id).cloned().collect())
    }

    async fn mark_read(&self, notification_id: &str) -> Result<(), BoxError> {
        let mut all = self.notifications.lock().map_err(|_| CoreError::StoreError("notification log mutex poisoned".to_string()))?;
        for notification in all.iter_mut() {
            if notification.id == notification_id {
                notification.read = true;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ReferralClickRepository for MemoryStore {
    async fn append(&self, click: &ReferralClick) -> Result<(), BoxError> {
        let mut all = self.clicks.lock().map_err(|_| CoreError::StoreError("click log mutex poisoned".to_string()))?;
        all.push(click.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ReferralClick>, BoxError> {
        let all = self.clicks.lock().map_err(|_| CoreError::StoreError("click log mutex poisoned".to_string()))?;
        Ok(all.clone())
    }
}
