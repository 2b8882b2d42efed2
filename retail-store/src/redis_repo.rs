use async_trait::async_trait;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use retail_core::notification::{Notification, ReferralClick};
use retail_core::repository::{NotificationRepository, ReferralClickRepository};

/// Fixed key holding every notification ever dispatched, as one JSON array.
pub const NOTIFICATIONS_KEY: &str = "customer_notifications";
/// Fixed key holding every tracked referral click, as one JSON array.
pub const REFERRAL_CLICKS_KEY: &str = "referral_clicks";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Key-value store client. Each collection is a single serialized value:
/// every read deserializes the whole collection, every write replaces it.
#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    pub async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, BoxError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), BoxError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let text = serde_json::to_string(items)?;
        conn.set::<_, _, ()>(key, text).await?;
        Ok(())
    }
}

/// Notification log on top of the key-value client.
///
/// The read-push-write cycle is not atomic; two concurrent appends can lose
/// an update (last write wins). Single-admin usage model.
pub struct RedisNotificationStore {
    client: RedisClient,
}

impl RedisNotificationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationRepository for RedisNotificationStore {
    async fn append(&self, notification: &Notification) -> Result<(), BoxError> {
        let mut all: Vec<Notification> = self.client.read_collection(NOTIFICATIONS_KEY).await?;
        all.push(notification.clone());
        self.client.write_collection(NOTIFICATIONS_KEY, &all).await?;
        info!(
            id = %notification.id,
            customer_id = %notification.customer_id,
            total = all.len(),
            "notification appended"
        );
        Ok(())
    }

    async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Notification>, BoxError> {
        let all: Vec<Notification> = self.client.read_collection(NOTIFICATIONS_KEY).await?;
        Ok(all.into_iter().filter(|n| n.customer_id == customer_id).collect())
    }

    async fn mark_read(&self, notification_id: &str) -> Result<(), BoxError> {
        let mut all: Vec<Notification> = self.client.read_collection(NOTIFICATIONS_KEY).await?;
        for notification in all.iter_mut() {
            if notification.id == notification_id {
                notification.read = true;
            }
        }
        // Unknown ids rewrite the collection unchanged: a silent no-op.
        self.client.write_collection(NOTIFICATIONS_KEY, &all).await
    }
}

pub struct RedisReferralClickStore {
    client: RedisClient,
}

impl RedisReferralClickStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReferralClickRepository for RedisReferralClickStore {
    async fn append(&self, click: &ReferralClick) -> Result<(), BoxError> {
        let mut all: Vec<ReferralClick> = self.client.read_collection(REFERRAL_CLICKS_KEY).await?;
        all.push(click.clone());
        self.client.write_collection(REFERRAL_CLICKS_KEY, &all).await?;
        info!(id = %click.id, customer_id = %click.customer_id, "referral click tracked");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ReferralClick>, BoxError> {
        self.client.read_collection(REFERRAL_CLICKS_KEY).await
    }
}
