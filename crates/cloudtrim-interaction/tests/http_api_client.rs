//! HttpApiClient against an in-process mock backend.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use cloudtrim_core::api::{CloudTrimApi, MemoryTokenStore, TokenStore};
use cloudtrim_core::auth::Credentials;
use cloudtrim_core::error::ApiError;
use cloudtrim_interaction::HttpApiClient;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const GOOD_TOKEN: &str = "tok-good";

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/costs/current", get(current_costs))
        .route("/api/v1/costs/historical", get(historical_costs))
        .route("/api/v1/resources", get(resources))
        .route("/api/v1/recommendations", get(broken_json))
        .route("/api/v1/optimization/apply/:id", post(apply))
        .route("/api/v1/health", get(crashing))
        .route("/api/v1/resources/utilization", get(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "token": GOOD_TOKEN,
                "user": {"email": body["email"], "companyName": "Acme", "plan": "Pro"}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        )
    }
}

async fn logout() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn current_costs(headers: HeaderMap) -> impl IntoResponse {
    match bearer(&headers).as_deref() {
        Some(GOOD_TOKEN) => (
            StatusCode::OK,
            Json(json!({
                "total_cost": 8200.0,
                "daily_costs": [{"date": "2024-03-01", "cost": 270.5}],
                "service_costs": [{"service": "EC2", "cost": 5100.0}],
                "trend_percentage": -3.5
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not authenticated"})),
        ),
    }
}

async fn historical_costs(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let days: f64 = params
        .get("days")
        .and_then(|d| d.parse().ok())
        .unwrap_or(0.0);
    Json(json!({"total_cost": days * 10.0}))
}

async fn resources(headers: HeaderMap) -> Json<Value> {
    // Echo whether a bearer header arrived so the test can observe it.
    let region = if bearer(&headers).is_some() { "with-token" } else { "no-token" };
    Json(json!([
        {"id": "i-1", "type": "EC2", "name": "web", "status": "Running", "cost": 45.2, "region": region}
    ]))
}

async fn broken_json() -> &'static str {
    "[{\"id\": "
}

async fn apply(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "id": id,
        "resource_type": "EC2",
        "resource_id": "i-1",
        "current_config": "m5.xlarge",
        "recommended_config": "m5.large",
        "potential_savings": 120.0,
        "priority": "high",
        "status": "applied"
    }))
}

async fn crashing() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(10)).await;
    Json(json!({}))
}

fn client(base: &str, tokens: Arc<MemoryTokenStore>) -> HttpApiClient {
    HttpApiClient::new(base, tokens).unwrap()
}

#[tokio::test]
async fn test_login_stores_token_and_authorizes_later_calls() {
    let base = spawn_backend().await;
    let tokens = Arc::new(MemoryTokenStore::new());
    let api = client(&base, tokens.clone());
    let cancel = CancellationToken::new();

    let payload = api
        .login(&cancel, &Credentials::new("ops@acme.io", "secret"))
        .await
        .unwrap();
    assert_eq!(payload.token.as_deref(), Some(GOOD_TOKEN));
    assert_eq!(payload.into_user().company_name, "Acme");
    assert_eq!(tokens.load().unwrap().as_deref(), Some(GOOD_TOKEN));

    let snapshot = api.get_current_costs(&cancel).await.unwrap();
    assert_eq!(snapshot.total_cost, 8200.0);
    assert_eq!(snapshot.service_costs.len(), 1);
}

#[tokio::test]
async fn test_failed_login_maps_server_message() {
    let base = spawn_backend().await;
    let tokens = Arc::new(MemoryTokenStore::new());
    let api = client(&base, tokens.clone());

    let err = api
        .login(&CancellationToken::new(), &Credentials::new("ops@acme.io", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::request(401, "Invalid credentials"));
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test]
async fn test_bearer_header_only_when_token_stored() {
    let base = spawn_backend().await;
    let cancel = CancellationToken::new();

    let anonymous = client(&base, Arc::new(MemoryTokenStore::new()));
    let rows = anonymous.get_resources(&cancel).await.unwrap();
    assert_eq!(rows[0].region, "no-token");

    let err = anonymous.get_current_costs(&cancel).await.unwrap_err();
    assert_eq!(err, ApiError::request(401, "Not authenticated"));
    assert!(err.is_unauthorized());

    let authed = client(&base, Arc::new(MemoryTokenStore::with_token("anything")));
    let rows = authed.get_resources(&cancel).await.unwrap();
    assert_eq!(rows[0].region, "with-token");
}

#[tokio::test]
async fn test_server_error_with_empty_body_uses_reason_phrase() {
    let base = spawn_backend().await;
    let api = client(&base, Arc::new(MemoryTokenStore::new()));

    let err = api.health_check(&CancellationToken::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "Internal Server Error");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let base = spawn_backend().await;
    let api = client(&base, Arc::new(MemoryTokenStore::new()));

    let result = api
        .get_optimization_recommendations(&CancellationToken::new())
        .await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_historical_costs_sends_days_query() {
    let base = spawn_backend().await;
    let api = client(&base, Arc::new(MemoryTokenStore::new()));

    let snapshot = api
        .get_historical_costs(&CancellationToken::new(), 30)
        .await
        .unwrap();
    assert_eq!(snapshot.total_cost, 300.0);
}

#[tokio::test]
async fn test_apply_returns_updated_recommendation() {
    let base = spawn_backend().await;
    let api = client(&base, Arc::new(MemoryTokenStore::new()));

    let updated = api
        .apply_recommendation(&CancellationToken::new(), "rec-7")
        .await
        .unwrap();
    assert_eq!(updated.id, "rec-7");
    assert!(updated.is_applied());
}

#[tokio::test]
async fn test_logout_clears_token_even_when_server_fails() {
    let base = spawn_backend().await;
    let tokens = Arc::new(MemoryTokenStore::with_token(GOOD_TOKEN));
    let api = client(&base, tokens.clone());

    let result = api.logout(&CancellationToken::new()).await;
    assert_eq!(result.unwrap_err().status(), Some(500));
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let base = spawn_backend().await;
    let api = client(&base, Arc::new(MemoryTokenStore::new()));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let result = api.get_resource_utilization(&cancel).await;
    assert_eq!(result, Err(ApiError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{addr}/api/v1"), Arc::new(MemoryTokenStore::new()));
    let result = api.get_resources(&CancellationToken::new()).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}
