mod model;
mod server;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    scheduler::booking_reminders,
    service::realtime::RealtimeHub,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let realtime = RealtimeHub::new();

    let cors = cors_layer(&config)?;

    // Start booking reminder scheduler
    let scheduler_db = db.clone();
    let scheduler_realtime = realtime.clone();
    tokio::spawn(async move {
        if let Err(e) = booking_reminders::start_scheduler(scheduler_db, scheduler_realtime).await {
            tracing::error!("Booking reminder scheduler error: {}", e);
        }
    });

    let bind_address = config.bind_address.clone();
    let router = server::router::router()
        .with_state(AppState::new(db, http_client, oauth_client, realtime, config))
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!("Starting server on {}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Allows the front end at `APP_URL` to call the API with a bearer token.
fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = config.app_url.trim_end_matches('/');
    let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
        name: "APP_URL".to_string(),
        value: config.app_url.clone(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
