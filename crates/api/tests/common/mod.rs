#![allow(dead_code)]

use std::sync::Arc;

use academy_api::auth::jwt::{issue_access_token, JwtConfig};
use academy_api::config::ServerConfig;
use academy_api::router::build_app_router;
use academy_api::state::AppState;
use academy_core::clock::SystemClock;
use academy_core::roles::Role;
use academy_core::types::DbId;
use academy_db::models::profile::CreateProfile;
use academy_db::repositories::ProfileRepo;
use academy_events::ScheduledPublisher;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// `APP_ENV` is `test`, so the cron trigger is trusted without headers.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        app_env: "test".to_string(),
        cron_secret: None,
        publish_interval_secs: 0,
        notification_ttl_days: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Config that enforces cron trigger checks with the given secret.
pub fn production_config(cron_secret: Option<&str>) -> ServerConfig {
    ServerConfig {
        app_env: "production".to_string(),
        cron_secret: cron_secret.map(str::to_string),
        ..test_config()
    }
}

/// Build the full application router over `pool` with [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Build the full application router with an explicit config.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let publisher = ScheduledPublisher::new(
        pool.clone(),
        Arc::new(SystemClock),
        config.notification_ttl_days,
    );
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        publisher,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a profile and return its id.
pub async fn create_profile(pool: &PgPool, email: &str, role: Role) -> DbId {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            full_name: format!("{email} name"),
            role,
        },
    )
    .await
    .expect("profile creation should succeed")
    .id
}

/// Mint a bearer token signed with the test secret.
pub fn token_for(user_id: DbId, role: Role) -> String {
    issue_access_token(user_id, role.as_str(), &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create an admin profile and return its bearer token.
pub async fn admin_token(pool: &PgPool) -> String {
    let id = create_profile(pool, "admin@example.com", Role::Admin).await;
    token_for(id, Role::Admin)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a request with arbitrary headers and no body.
pub async fn request_with_headers(
    app: Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
