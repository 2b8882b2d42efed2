use axum::{extract::State, routing::post, Json, Router};

use retail_catalog::Customer;
use retail_core::notification::Notification;
use retail_offer::{ComposeError, DispatchError, ManualOfferRequest};

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/offers/auto", post(dispatch_auto_offer))
        .route("/v1/offers/manual", post(dispatch_manual_offer))
}

/// POST /v1/offers/auto
/// Dispatch the suggested offer for a ranked customer
async fn dispatch_auto_offer(
    State(state): State<AppState>,
    Json(customer): Json<Customer>,
) -> Result<Json<Notification>, AppError> {
    // 1. Build the draft from the ranked snapshot
    let draft = state.composer.compose_auto(&customer).map_err(compose_advisory)?;

    // 2. Persist and simulate delivery
    let notification = state
        .dispatcher
        .dispatch(draft)
        .await
        .map_err(dispatch_advisory)?;

    Ok(Json(notification))
}

/// POST /v1/offers/manual
/// Dispatch an operator-composed offer
async fn dispatch_manual_offer(
    State(state): State<AppState>,
    Json(request): Json<ManualOfferRequest>,
) -> Result<Json<Notification>, AppError> {
    let draft = state.composer.compose_manual(request).map_err(compose_advisory)?;

    let notification = state
        .dispatcher
        .dispatch(draft)
        .await
        .map_err(dispatch_advisory)?;

    Ok(Json(notification))
}

fn compose_advisory(err: ComposeError) -> AppError {
    match err {
        ComposeError::MissingInformation(field) => {
            tracing::warn!(field, "offer rejected: missing information");
            AppError::ValidationError("Please fill in all required fields.".to_string())
        }
    }
}

fn dispatch_advisory(err: DispatchError) -> AppError {
    tracing::warn!("dispatch failed: {}", err);
    AppError::ServiceError("Failed to send the offer. Please try again later.".to_string())
}
