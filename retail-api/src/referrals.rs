use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use retail_core::notification::ReferralClick;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickRequest {
    pub referral_link: String,
    pub customer_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/referrals/click", post(track_click))
}

/// POST /v1/referrals/click
async fn track_click(
    State(state): State<AppState>,
    Json(req): Json<TrackClickRequest>,
) -> Result<Json<ReferralClick>, AppError> {
    let click = state
        .tracker
        .track(&req.referral_link, &req.customer_id)
        .await
        .map_err(|e| {
            tracing::warn!("click tracking failed: {}", e);
            AppError::ServiceError("Please try again later.".to_string())
        })?;

    Ok(Json(click))
}
