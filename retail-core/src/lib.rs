pub mod notification;
pub mod repository;
pub mod identity;

pub use notification::{Notification, OfferKind, ReferralClick};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Store operation failed: {0}")]
    StoreError(String),
    #[error("Delivery failed: {0}")]
    DeliveryError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
