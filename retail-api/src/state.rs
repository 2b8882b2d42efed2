use std::sync::Arc;

use retail_catalog::CustomerDirectory;
use retail_core::identity::AdminCredential;
use retail_core::repository::NotificationRepository;
use retail_loyalty::LoyaltyPipeline;
use retail_offer::{ClickTracker, DispatchService, OfferComposer};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub admin: AdminCredential,
}

#[derive(Clone)]
pub struct AppState {
    pub notifications: Arc<dyn NotificationRepository>,
    pub directory: Arc<CustomerDirectory>,
    pub pipeline: Arc<LoyaltyPipeline>,
    pub composer: Arc<OfferComposer>,
    pub dispatcher: Arc<DispatchService>,
    pub tracker: Arc<ClickTracker>,
    pub auth: AuthConfig,
}
