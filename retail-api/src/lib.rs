use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod customers;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod offers;
pub mod referrals;
pub mod state;
pub mod uploads;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Everything except login sits behind the admin session token.
    let protected = Router::new()
        .merge(uploads::routes())
        .merge(customers::routes())
        .merge(offers::routes())
        .merge(notifications::routes())
        .merge(referrals::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::admin_auth_middleware,
        ));

    Router::new()
        .merge(auth::routes())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
