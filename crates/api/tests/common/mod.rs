#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use baba_api::auth::jwt::{generate_access_token, JwtConfig};
use baba_api::config::{ServerConfig, YardConfig};
use baba_api::router::build_app_router;
use baba_api::state::AppState;
use baba_api::ws::WsManager;
use baba_events::EventBus;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The visit simulator is never started by the tests; visits are driven
/// explicitly through the engine.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: test_jwt_config(),
        yard: YardConfig {
            simulator_enabled: false,
            ..YardConfig::default()
        },
    }
}

/// Build the state shared by the test router.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(test_state(pool), &config)
}

/// Issue a bearer token for an identity-provider user id.
pub fn token_for(uid: &str) -> String {
    generate_access_token(uid, Some(&format!("{uid}@example.com")), &test_jwt_config())
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    builder(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Provision the local user for `uid` and return its id.
pub async fn user_id_for(pool: &PgPool, uid: &str) -> i64 {
    baba_db::repositories::UserRepo::find_or_create(pool, uid, None)
        .await
        .unwrap()
        .id
}

/// Give a user spoons through the regular ledger path.
pub async fn grant_spoons(pool: &PgPool, user_id: i64, amount: i64) {
    let mut tx = pool.begin().await.unwrap();
    baba_api::engine::ledger::award_in_tx(
        &mut tx,
        user_id,
        baba_core::spoons::SpoonAction::CatVisit,
        "seed",
        Some(amount),
        Some("Test grant"),
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();
}

/// Look up a seeded goodie's id by name.
pub async fn goodie_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM goodies WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Buy a goodie over HTTP and return the new inventory unit's id.
pub async fn buy(pool: &PgPool, token: &str, goodie_name: &str) -> i64 {
    let goodie = goodie_id(pool, goodie_name).await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/marketplace/purchase",
        serde_json::json!({ "goodie_id": goodie }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["item"]["id"]
        .as_i64()
        .unwrap()
}
