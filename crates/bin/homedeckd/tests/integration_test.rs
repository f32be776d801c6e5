//! End-to-end smoke tests for the full homedeckd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`: no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use homedeck_adapter_http_axum::router;
use homedeck_adapter_http_axum::state::AppState;
use homedeck_adapter_storage_sqlite_sqlx::{
    Config, SqliteActivityLogRepository, SqliteDeviceRepository,
};
use homedeck_app::services::activity_service::ActivityService;
use homedeck_app::services::device_service::DeviceService;
use homedeck_domain::demo::demo_devices;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app(seed: bool) -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let device_service = DeviceService::new(SqliteDeviceRepository::new(pool.clone()));
    if seed {
        device_service.seed_if_empty(demo_devices()).await.unwrap();
    }
    let state = AppState::new(
        device_service,
        ActivityService::new(SqliteActivityLogRepository::new(pool)),
    );

    router::build(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app(false).await.oneshot(get("/api/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_seeded_demo_devices() {
    let resp = app(true).await.oneshot(get("/api/devices")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let names: Vec<&str> = body["devices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "Luz Sala",
            "Luz Dormitorio",
            "Puerta Principal",
            "Puerta Garage",
            "Termostato Principal",
            "Sensor Entrada",
            "Cámara Entrada",
        ]
    );
}

#[tokio::test]
async fn should_list_no_devices_when_not_seeded() {
    let resp = app(false).await.oneshot(get("/api/devices")).await.unwrap();

    assert_eq!(body_json(resp).await, json!({"devices": []}));
}

#[tokio::test]
async fn should_persist_full_device_lifecycle() {
    let app = app(false).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/devices",
            &json!({"name": "Hall", "type": "thermostat", "location": "Entrada"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/devices/{id}"),
            &json!({"status": {"temperature": 19.5, "target": 24}}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/devices/{id}")))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["status"]["target"], 24.0);
    assert_eq!(body["status"]["temperature"], 19.5);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/devices/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(get(&format!("/api/devices/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_out_of_range_target() {
    let resp = app(true)
        .await
        .oneshot(json_request(
            "PATCH",
            "/api/devices/5",
            &json!({"target": 35}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn should_reject_malformed_json_body() {
    let resp = app(true)
        .await
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/devices/1")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_record_and_list_activity() {
    let app = app(true).await;

    for action in ["power", "brightness"] {
        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/activity-logs",
                &json!({"device_id": "1", "action": action}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = app.oneshot(get("/api/activity-logs")).await.unwrap();
    let body = body_json(resp).await;
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l["device_id"] == "1"));
}
