//! In-memory repositories and request helpers shared by handler tests.

use std::future::Future;
use std::sync::Mutex;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;

use homedeck_app::ports::{ActivityLogRepository, DeviceRepository};
use homedeck_app::services::activity_service::ActivityService;
use homedeck_app::services::device_service::DeviceService;
use homedeck_domain::activity::ActivityLog;
use homedeck_domain::demo::demo_devices;
use homedeck_domain::device::Device;
use homedeck_domain::error::{HomeDeckError, NotFoundError};
use homedeck_domain::id::DeviceId;

use crate::state::AppState;

#[derive(Default)]
pub struct InMemoryDeviceRepo {
    store: Mutex<Vec<Device>>,
}

fn not_found(id: &DeviceId) -> HomeDeckError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

impl DeviceRepository for InMemoryDeviceRepo {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HomeDeckError>> + Send {
        self.store.lock().unwrap().push(device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HomeDeckError>> + Send {
        let result = self
            .store
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HomeDeckError>> + Send {
        let result = self.store.lock().unwrap().clone();
        async { Ok(result) }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, HomeDeckError>> + Send {
        let mut store = self.store.lock().unwrap();
        let result = match store.iter_mut().find(|d| d.id == device.id) {
            Some(slot) => {
                *slot = device.clone();
                Ok(device)
            }
            None => Err(not_found(&device.id)),
        };
        async { result }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HomeDeckError>> + Send {
        self.store.lock().unwrap().retain(|d| d.id != id);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct InMemoryActivityRepo {
    logs: Mutex<Vec<ActivityLog>>,
}

impl ActivityLogRepository for InMemoryActivityRepo {
    fn append(
        &self,
        log: ActivityLog,
    ) -> impl Future<Output = Result<ActivityLog, HomeDeckError>> + Send {
        self.logs.lock().unwrap().push(log.clone());
        async { Ok(log) }
    }

    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActivityLog>, HomeDeckError>> + Send {
        let result: Vec<ActivityLog> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

pub type TestState = AppState<InMemoryDeviceRepo, InMemoryActivityRepo>;

pub fn test_state() -> TestState {
    AppState::new(
        DeviceService::new(InMemoryDeviceRepo::default()),
        ActivityService::new(InMemoryActivityRepo::default()),
    )
}

/// A state holding the demo devices.
pub async fn seeded_state() -> TestState {
    let state = test_state();
    state
        .device_service
        .seed_if_empty(demo_devices())
        .await
        .unwrap();
    state
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
