// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::http::{Request, StatusCode};
use axum::{Router, routing::get};
use apprunner_vpc_demo::{AppState, RuntimeConfig, VisitStore, create_router};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

fn make_state(config: RuntimeConfig) -> Arc<AppState> {
    let store = VisitStore::connect_lazy(&config).unwrap();
    Arc::new(AppState::new(config, store).unwrap())
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Binds an upstream on an ephemeral port and serves it in the background
async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// --- /health endpoint ---

#[tokio::test]
async fn health_returns_contract_payload() {
    let app = create_router(make_state(RuntimeConfig::default()));

    let resp = app
        .oneshot(Request::get("/health").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "Status": "Healthy" }));
}

#[tokio::test]
async fn health_works_with_unusable_database_config() {
    // Health must not depend on RuntimeConfig state beyond being resolved
    let config = RuntimeConfig {
        db_host: "db.invalid".to_string(),
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let resp = app
        .oneshot(Request::get("/health").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- / (visit registration) ---

#[tokio::test]
async fn register_visit_best_effort_returns_200_without_database() {
    // Default config has no reachable database; best-effort mode still
    // acknowledges the visit and only logs the failure.
    let app = create_router(make_state(RuntimeConfig::default()));

    let resp = app
        .oneshot(
            Request::get("/")
                .header("user-agent", "integration-test/1.0")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Response"], "Registered request");
}

#[tokio::test]
async fn register_visit_accepts_missing_user_agent() {
    let app = create_router(make_state(RuntimeConfig::default()));

    let resp = app
        .oneshot(Request::get("/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_visit_strict_returns_500_without_database() {
    let config = RuntimeConfig {
        strict_visits: true,
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let resp = app
        .oneshot(Request::get("/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["Response"], "Error, unable to register visit");
}

// --- /recent-visits ---

#[tokio::test]
async fn recent_visits_returns_500_contract_body_without_database() {
    let app = create_router(make_state(RuntimeConfig::default()));

    let resp = app
        .oneshot(Request::get("/recent-visits").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["Response"], "Error, unable to produce recent visits");
}

// --- /test-connection ---

#[tokio::test]
async fn test_connection_reports_success_for_listening_target() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = RuntimeConfig {
        target_host: "127.0.0.1".to_string(),
        target_port: port,
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let resp = app
        .oneshot(Request::get("/test-connection").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let outcome = body["Response"].as_str().unwrap();
    assert!(outcome.contains("succeeded"), "unexpected outcome: {outcome}");
}

#[tokio::test]
async fn test_connection_reports_failure_for_closed_port() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = RuntimeConfig {
        target_host: "127.0.0.1".to_string(),
        target_port: port,
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let start = std::time::Instant::now();
    let resp = app
        .oneshot(Request::get("/test-connection").body(String::new()).unwrap())
        .await
        .unwrap();

    // A probe failure is still a 200 with a failure text, within the timeout
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(start.elapsed() < std::time::Duration::from_secs(3));
    let body = body_json(resp).await;
    let outcome = body["Response"].as_str().unwrap();
    assert!(
        outcome.contains("failed") || outcome.contains("timed out"),
        "unexpected outcome: {outcome}"
    );
}

// --- /ecs-private-service ---

#[tokio::test]
async fn private_service_proxy_echoes_upstream_body() {
    let upstream = Router::new().route("/", get(|| async { "hello from the private service" }));
    let url = spawn_upstream(upstream).await;

    let config = RuntimeConfig {
        private_service_url: Some(url),
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let resp = app
        .oneshot(
            Request::get("/ecs-private-service")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Response"], "hello from the private service");
}

#[tokio::test]
async fn private_service_proxy_without_url_returns_500() {
    let app = create_router(make_state(RuntimeConfig::default()));

    let resp = app
        .oneshot(
            Request::get("/ecs-private-service")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    let message = body["Response"].as_str().unwrap();
    assert!(message.contains("ECSPRIVATESERVICE"), "unexpected message: {message}");
}

#[tokio::test]
async fn private_service_proxy_maps_upstream_error_to_502() {
    let upstream = Router::new().route(
        "/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_upstream(upstream).await;

    let config = RuntimeConfig {
        private_service_url: Some(url),
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let resp = app
        .oneshot(
            Request::get("/ecs-private-service")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn private_service_proxy_maps_connection_failure_to_502() {
    // Ephemeral port with nothing listening behind it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RuntimeConfig {
        private_service_url: Some(format!("http://{addr}")),
        ..RuntimeConfig::default()
    };
    let app = create_router(make_state(config));

    let resp = app
        .oneshot(
            Request::get("/ecs-private-service")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

// --- 404 for unknown routes ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = create_router(make_state(RuntimeConfig::default()));

    let resp = app
        .oneshot(Request::get("/unknown").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
