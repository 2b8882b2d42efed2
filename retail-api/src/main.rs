use std::net::SocketAddr;
use std::sync::Arc;

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
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retail_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = retail_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting SmartRetailer API on port {}", config.server.port);

    // Redis-backed notification and click logs
    let redis_client = retail_store::RedisClient::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");
    let notifications: Arc<dyn NotificationRepository> =
        Arc::new(retail_store::RedisNotificationStore::new(redis_client.clone()));
    let clicks: Arc<dyn ReferralClickRepository> =
        Arc::new(retail_store::RedisReferralClickStore::new(redis_client));

    let directory = Arc::new(CustomerDirectory::default());
    let pipeline = Arc::new(LoyaltyPipeline::new(config.ranking.clone()));
    let composer = Arc::new(OfferComposer::new(
        ReferralLinkGenerator::new(config.referral.clone()),
        directory.clone(),
    ));
    let transport = Arc::new(LoggingEmailTransport::new(config.delivery.clone()));
    let dispatcher = Arc::new(DispatchService::new(notifications.clone(), transport));
    let tracker = Arc::new(ClickTracker::new(clicks));

    let app_state = AppState {
        notifications,
        directory,
        pipeline,
        composer,
        dispatcher,
        tracker,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
            admin: AdminCredential {
                email: config.auth.admin_email.clone(),
                password: config.auth.admin_password.clone(),
                display_name: config.auth.admin_display_name.clone(),
            },
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
