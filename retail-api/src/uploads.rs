use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use retail_catalog::Customer;
use retail_loyalty::PipelineError;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub content: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/uploads", post(upload_purchases))
}

/// POST /v1/uploads
/// Run an uploaded purchase CSV through the ranking pipeline
async fn upload_purchases(
    State(state): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let ranked = state
        .pipeline
        .process(&req.filename, &req.content)
        .map_err(|e| match e {
            PipelineError::InvalidFileType(name) => {
                tracing::warn!(filename = %name, "rejected upload: not a CSV");
                AppError::ValidationError("Please upload a CSV file.".to_string())
            }
            PipelineError::Processing(msg) => {
                tracing::warn!("CSV processing failed: {}", msg);
                AppError::ServiceError(
                    "Failed to process the CSV file. Please try again.".to_string(),
                )
            }
        })?;

    Ok(Json(ranked))
}
