use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::server::{
    config::Config, router::router, service::realtime::RealtimeHub, startup, state::AppState,
};

mod booking;

const TEST_SECRET: &str = "test-secret";

/// Builds the full application router over a test database with every optional
/// integration disabled.
async fn app(db: &DatabaseConnection) -> Router {
    let config = Config::from_lookup(|name| {
        let value = match name {
            "DATABASE_URL" => "sqlite::memory:",
            "APP_URL" => "http://localhost:3000",
            "JWT_SECRET" => TEST_SECRET,
            "BCRYPT_COST" => "4",
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap();
    let session = startup::connect_to_session(db).await.unwrap();

    router()
        .with_state(AppState::new(
            db.clone(),
            reqwest::Client::new(),
            None,
            RealtimeHub::new(),
            config,
        ))
        .layer(session)
}

/// Sends one request through the router and returns the status and JSON body.
///
/// Empty bodies come back as `Value::Null`.
async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Registers an account over HTTP and returns its token.
async fn register(app: Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Test User",
            "email": email,
            "password": "correct-horse",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["token"].as_str().unwrap().to_string()
}
