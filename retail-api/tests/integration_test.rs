use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

use retail_api::{
    app,
    state::{AppState, AuthConfig},
};
use retail_catalog::CustomerDirectory;
use retail_core::identity::AdminCredential;
use retail_core::repository::{NotificationRepository, ReferralClickRepository};
use retail_loyalty::LoyaltyPipeline;
use retail_offer::{
    ClickTracker, DispatchService, LoggingEmailTransport, OfferComposer, ReferralLinkGenerator,
};
use retail_store::app_config::{DeliveryConfig, RankingConfig, ReferralConfig};
use retail_store::MemoryStore;

fn test_app() -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    let notifications: Arc<dyn NotificationRepository> = store.clone();
    let clicks: Arc<dyn ReferralClickRepository> = store;

    let directory = Arc::new(CustomerDirectory::default());
    let transport = Arc::new(LoggingEmailTransport::new(DeliveryConfig {
        simulated_delay_ms: 0,
    }));

    let state = AppState {
        notifications: notifications.clone(),
        directory: directory.clone(),
        pipeline: Arc::new(LoyaltyPipeline::new(RankingConfig::default())),
        composer: Arc::new(OfferComposer::new(
            ReferralLinkGenerator::new(ReferralConfig::default()),
            directory,
        )),
        dispatcher: Arc::new(DispatchService::new(notifications, transport)),
        tracker: Arc::new(ClickTracker::new(clicks)),
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
            admin: AdminCredential {
                email: "admin@smartretailer.com".to_string(),
                password: "admin123".to_string(),
                display_name: "SmartRetailer Admin".to_string(),
            },
        },
    };

    app(state)
}

async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn login(app: &axum::Router) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/v1/auth/login",
        None,
        Some(json!({ "email": "admin@smartretailer.com", "password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn push_rows(
    csv: &mut String,
    id: &str,
    name: &str,
    email: &str,
    product: &str,
    amount: f64,
    count: u32,
    purchased_at: DateTime<Utc>,
) {
    for _ in 0..count {
        csv.push_str(&format!(
            "{},{},{},{},{:.2},{}\n",
            id,
            name,
            email,
            product,
            amount,
            purchased_at.to_rfc3339()
        ));
    }
}

/// Eleven customers; Sarah Johnson is engineered to score exactly 95 and the
/// weakest one falls past the top-10 cap.
fn scenario_csv() -> String {
    let now = Utc::now();
    let mut csv = String::from("customer_id,name,email,product,amount,purchased_at\n");

    // 50 purchases (saturated), 250.00 average (saturated), 18 idle days:
    // 40 + 35 + 25 * (1 - 18/90) = 95.
    push_rows(
        &mut csv,
        "1",
        "Sarah Johnson",
        "sarah.johnson@email.com",
        "Premium Skincare Set",
        250.00,
        50,
        now - Duration::days(18),
    );

    for i in 0..10u32 {
        let id = (i + 2).to_string();
        push_rows(
            &mut csv,
            &id,
            &format!("Customer {}", id),
            &format!("customer{}@email.com", id),
            "Garden Hose",
            220.0 - 10.0 * i as f64,
            40 - 2 * i,
            now - Duration::days(20 + 2 * i as i64),
        );
    }

    csv
}

#[tokio::test]
async fn login_issues_a_token_and_rejects_anything_else() {
    let app = test_app();

    let token = login(&app).await;
    assert!(!token.is_empty());

    let (status, body) = request(
        &app,
        "POST",
        "/v1/auth/login",
        None,
        Some(json!({ "email": "admin@smartretailer.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn admin_routes_require_a_session_token() {
    let app = test_app();
    let (status, _) = request(&app, "GET", "/v1/customers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "GET", "/v1/customers", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn the_directory_lists_and_searches_customers() {
    let app = test_app();
    let token = login(&app).await;

    let (status, body) = request(&app, "GET", "/v1/customers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 15);

    let (status, body) = request(&app, "GET", "/v1/customers?q=sarah", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], "1");
}

#[tokio::test]
async fn uploading_the_scenario_csv_ranks_sarah_first_with_95() {
    let app = test_app();
    let token = login(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/uploads",
        Some(&token),
        Some(json!({ "filename": "customers.csv", "content": scenario_csv() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0]["name"], "Sarah Johnson");
    assert_eq!(ranked[0]["loyaltyScore"], 95);
    assert_eq!(ranked[0]["id"], "1");

    let scores: Vec<i64> = ranked
        .iter()
        .map(|c| c["loyaltyScore"].as_i64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(ranked
        .iter()
        .all(|c| !c["recommendedOffer"].as_str().unwrap().is_empty()));
}

#[tokio::test]
async fn non_csv_uploads_are_rejected_without_side_effects() {
    let app = test_app();
    let token = login(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/v1/uploads",
        Some(&token),
        Some(json!({ "filename": "customers.xlsx", "content": scenario_csv() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please upload a CSV file.");
}

#[tokio::test]
async fn dispatching_an_auto_offer_appends_to_the_notification_log() {
    let app = test_app();
    let token = login(&app).await;

    let (_, ranked) = request(
        &app,
        "POST",
        "/v1/uploads",
        Some(&token),
        Some(json!({ "filename": "customers.csv", "content": scenario_csv() })),
    )
    .await;
    let sarah = ranked.as_array().unwrap()[0].clone();

    let (status, sent) = request(&app, "POST", "/v1/offers/auto", Some(&token), Some(sarah)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["kind"], "auto-offer");

    let (status, stored) = request(
        &app,
        "GET",
        "/v1/customers/1/notifications",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entries = stored.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry["customerId"], "1");
    assert_eq!(entry["kind"], "auto-offer");
    assert_eq!(entry["read"], false);
    assert_eq!(entry["loyaltyScore"], 95);

    let link = entry["referralLink"].as_str().unwrap();
    let digits = link
        .strip_prefix("https://smartretailer.com/refer/1/")
        .unwrap();
    assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn manual_offers_with_missing_fields_never_reach_the_store() {
    let app = test_app();
    let token = login(&app).await;

    for body in [
        json!({ "customerId": "", "title": "Special Deal", "message": "Enjoy 10% off" }),
        json!({ "customerId": "3", "title": "", "message": "Enjoy 10% off" }),
        json!({ "customerId": "3", "title": "Special Deal", "message": "" }),
    ] {
        let (status, response) =
            request(&app, "POST", "/v1/offers/manual", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Please fill in all required fields.");
    }

    let (_, stored) = request(
        &app,
        "GET",
        "/v1/customers/3/notifications",
        Some(&token),
        None,
    )
    .await;
    assert!(stored.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn manual_offers_get_a_generated_link_when_none_is_supplied() {
    let app = test_app();
    let token = login(&app).await;

    let (status, sent) = request(
        &app,
        "POST",
        "/v1/offers/manual",
        Some(&token),
        Some(json!({ "customerId": "3", "title": "Special Deal", "message": "Enjoy 10% off" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["kind"], "manual-offer");

    let link = sent["referralLink"].as_str().unwrap();
    assert!(!link.is_empty());
    assert!(link.starts_with("https://smartretailer.com/refer/3/"));

    let (_, stored) = request(
        &app,
        "GET",
        "/v1/customers/3/notifications",
        Some(&token),
        None,
    )
    .await;
    let entries = stored.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["referralLink"], link);
}

#[tokio::test]
async fn mark_read_is_idempotent_and_silent_for_unknown_ids() {
    let app = test_app();
    let token = login(&app).await;

    let (_, sent) = request(
        &app,
        "POST",
        "/v1/offers/manual",
        Some(&token),
        Some(json!({ "customerId": "5", "title": "Special Deal", "message": "Enjoy 10% off" })),
    )
    .await;
    let id = sent["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let (status, _) = request(
            &app,
            "POST",
            &format!("/v1/notifications/{}/read", id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, stored) = request(
            &app,
            "GET",
            "/v1/customers/5/notifications",
            Some(&token),
            None,
        )
        .await;
        let entries = stored.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["read"], true);
    }

    let (status, _) = request(
        &app,
        "POST",
        "/v1/notifications/does-not-exist/read",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn referral_clicks_are_tracked_unconverted() {
    let app = test_app();
    let token = login(&app).await;

    let (status, click) = request(
        &app,
        "POST",
        "/v1/referrals/click",
        Some(&token),
        Some(json!({
            "referralLink": "https://smartretailer.com/refer/2/1718000000000/abc123def4567",
            "customerId": "2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(click["customerId"], "2");
    assert_eq!(click["converted"], false);
    assert!(click["clickedAt"].as_str().is_some());
}
