use std::sync::Arc;

use anyhow::Result;
use api_server::{router, AppState};
use application::StoreApp;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use config::Config;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,application=info,tower_http=debug")
        .init();

    info!("🚀 Starting BookHaven API Server");

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    info!("💾 Using database: {}", config.database_url);
    info!("🌐 API server will bind to: {}", config.api_address());

    let app = Arc::new(StoreApp::new(&config).await?);

    if config.seed_on_start {
        app.seed_if_empty().await?;
    }

    let state = AppState { app };
    let api = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config)),
    );

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   GET  /api/books                  - Browse the catalog");
    info!("   POST /api/users                  - Create an account");
    info!("   POST /api/users/login            - Sign in");
    info!("   POST /api/orders                 - Place an order");
    info!("   POST /api/payment/create-session - Open a checkout session");
    info!("   POST /api/newsletter/subscribe   - Join the newsletter");
    info!("   POST /api/chat                   - Talk to the book assistant");
    info!("   GET  /health                     - Health check");

    axum::serve(listener, api).await?;

    Ok(())
}

/// Browser clients send credentials, so the allowed origins are an
/// explicit list rather than a wildcard.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}
