use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use retail_core::notification::Notification;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/customers/{customer_id}/notifications",
            get(list_customer_notifications),
        )
        .route(
            "/v1/notifications/{notification_id}/read",
            post(mark_notification_read),
        )
}

/// GET /v1/customers/{customer_id}/notifications
async fn list_customer_notifications(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state
        .notifications
        .list_by_customer(&customer_id)
        .await
        .map_err(store_advisory)?;
    Ok(Json(notifications))
}

/// POST /v1/notifications/{notification_id}/read
/// Unknown ids are a silent no-op, so this always answers 204.
async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .notifications
        .mark_read(&notification_id)
        .await
        .map_err(store_advisory)?;
    Ok(StatusCode::NO_CONTENT)
}

fn store_advisory(err: Box<dyn std::error::Error + Send + Sync>) -> AppError {
    tracing::warn!("notification store failure: {}", err);
    AppError::ServiceError("Please try again later.".to_string())
}
