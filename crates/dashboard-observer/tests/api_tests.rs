//! Integration tests for the dashboard REST endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use dashboard_core::Dashboard;
use dashboard_observer::router::build_router;
use dashboard_observer::state::AppState;
use dashboard_types::CounterSnapshot;
use serde_json::Value;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    Arc::new(AppState::new())
}

async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn call(state: &Arc<AppState>, method: Method, uri: &str) -> (StatusCode, String) {
    send(build_router(Arc::clone(state)), method, uri).await
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_welcome_html() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h4>Welcome to Dashboard app</h4>");
}

#[tokio::test]
async fn test_increment_endpoints() {
    let state = make_test_state();

    assert_eq!(
        call(&state, Method::POST, "/order").await,
        (StatusCode::OK, String::from("Order Added"))
    );
    assert_eq!(
        call(&state, Method::POST, "/sign-up").await,
        (StatusCode::OK, String::from("Customer Added"))
    );
    assert_eq!(
        call(&state, Method::POST, "/product").await,
        (StatusCode::OK, String::from("Product Added"))
    );

    assert_eq!(
        state.dashboard.snapshot().await,
        CounterSnapshot::new(1, 1, 1)
    );
}

#[tokio::test]
async fn test_decrement_endpoints() {
    let state = Arc::new(AppState::with_dashboard(Arc::new(Dashboard::with_initial(
        CounterSnapshot::new(1, 1, 1),
    ))));

    assert_eq!(
        call(&state, Method::DELETE, "/order").await,
        (StatusCode::OK, String::from("Order Removed"))
    );
    assert_eq!(
        call(&state, Method::DELETE, "/sign-off").await,
        (StatusCode::OK, String::from("Customer Removed"))
    );
    assert_eq!(
        call(&state, Method::DELETE, "/product").await,
        (StatusCode::OK, String::from("Product Removed"))
    );

    assert_eq!(state.dashboard.snapshot().await, CounterSnapshot::default());
}

#[tokio::test]
async fn test_decrement_at_zero_is_bad_request() {
    let state = make_test_state();

    for uri in ["/order", "/sign-off", "/product"] {
        let (status, body) = call(&state, Method::DELETE, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().starts_with("no "));
    }

    assert_eq!(state.dashboard.snapshot().await, CounterSnapshot::default());
}

#[tokio::test]
async fn test_get_dashboard_snapshot() {
    let state = make_test_state();
    call(&state, Method::POST, "/order").await;
    call(&state, Method::POST, "/order").await;
    call(&state, Method::POST, "/product").await;

    let (status, body) = call(&state, Method::GET, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"orders": 2, "customers": 0, "products": 1})
    );
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let state = make_test_state();

    let (status, _) = call(&state, Method::DELETE, "/sign-up").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = call(&state, Method::POST, "/sign-off").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(state.dashboard.snapshot().await, CounterSnapshot::default());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = call(&make_test_state(), Method::POST, "/widget").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_requires_websocket_upgrade() {
    let (status, _) = call(&make_test_state(), Method::GET, "/dashboard").await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_mutations_wake_subscribers_only_on_success() {
    let state = make_test_state();
    let mut subscription = state.dashboard.subscribe();

    call(&state, Method::POST, "/order").await;
    assert!(subscription.try_take());

    call(&state, Method::DELETE, "/order").await;
    assert!(subscription.try_take());

    let (status, _) = call(&state, Method::DELETE, "/order").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!subscription.try_take());
}

#[tokio::test]
async fn test_concurrent_requests_are_all_applied() {
    let state = make_test_state();

    let mut handles = Vec::new();
    for _ in 0..25 {
        let state = Arc::clone(&state);
        handles.push(tokio::spawn(async move {
            call(&state, Method::POST, "/sign-up").await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().0, StatusCode::OK);
    }

    assert_eq!(state.dashboard.snapshot().await.customers, 25);
}
