//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod activity_logs;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use homedeck_app::ports::{ActivityLogRepository, DeviceRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, LR>() -> Router<AppState<DR, LR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, LR>).post(devices::create::<DR, LR>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DR, LR>)
                .put(devices::replace::<DR, LR>)
                .patch(devices::patch::<DR, LR>)
                .delete(devices::delete::<DR, LR>),
        )
        // Activity logs
        .route(
            "/activity-logs",
            get(activity_logs::list::<DR, LR>).post(activity_logs::create::<DR, LR>),
        )
}

/// `GET /api/health`
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
