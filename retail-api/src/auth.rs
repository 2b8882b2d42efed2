use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use retail_core::identity::{self, AdminProfile, Credentials};

use crate::{error::AppError, middleware::auth::AdminClaims, state::AppState};

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: AdminProfile,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let profile = identity::authenticate(&credentials, &state.auth.admin)
        .map_err(|_| AppError::AuthenticationError("Invalid email or password".to_string()))?;

    let claims = AdminClaims {
        sub: profile.id.clone(),
        email: profile.email.clone(),
        name: profile.name.clone(),
        role: profile.role.clone(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::Anyhow(anyhow::anyhow!("Token encoding failed: {}", e)))?;

    Ok(Json(AuthResponse {
        token,
        user: profile,
    }))
}
