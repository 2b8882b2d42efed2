use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use retail_catalog::directory::demo_loyal_customers;
use retail_catalog::Customer;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    pub q: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/customers", get(list_customers))
        .route("/v1/customers/loyal", get(list_loyal_customers))
}

/// GET /v1/customers
/// The selection directory, optionally filtered by name/email substring
async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Json<Vec<Customer>> {
    let customers = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => state.directory.search(q).into_iter().cloned().collect(),
        None => state.directory.all().to_vec(),
    };
    Json(customers)
}

/// GET /v1/customers/loyal
/// Demo loyal-customer dataset shown before any upload has happened
async fn list_loyal_customers() -> Json<Vec<Customer>> {
    Json(demo_loyal_customers())
}
