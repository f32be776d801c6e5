//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use homedeck_app::ports::{ActivityLogRepository, DeviceRepository};
use homedeck_app::services::device_service::DevicePatch;
use homedeck_domain::device::{Device, DeviceStatus, DeviceType, StatusPatch};
use homedeck_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub location: Option<String>,
    pub status: Option<StatusPatch>,
}

/// Request body for replacing a device status.
#[derive(Deserialize)]
pub struct ReplaceStatusRequest {
    pub status: StatusPatch,
}

/// Request body for a partial update.
///
/// Status keys may be nested under `status` or sent at the top level; the
/// nested form wins when both name the same key.
#[derive(Deserialize)]
pub struct PatchDeviceRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub status: StatusPatch,
    #[serde(flatten)]
    pub fields: StatusPatch,
}

impl From<PatchDeviceRequest> for DevicePatch {
    fn from(req: PatchDeviceRequest) -> Self {
        let mut status = req.fields;
        status.extend(req.status);
        Self {
            name: req.name,
            location: req.location,
            status,
        }
    }
}

/// Body of the list endpoint.
#[derive(Serialize)]
pub struct DeviceList {
    pub devices: Vec<Device>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<DeviceList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, replace and patch endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DR, LR>(
    State(state): State<AppState<DR, LR>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(DeviceList { devices })))
}

/// `GET /api/devices/{id}`
pub async fn get<DR, LR>(
    State(state): State<AppState<DR, LR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DR, LR>(
    State(state): State<AppState<DR, LR>>,
    payload: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let status = DeviceStatus::from_map(req.device_type, req.status.unwrap_or_default())?;

    let mut builder = Device::builder().name(req.name).status(status);
    if let Some(location) = req.location {
        builder = builder.location(location);
    }

    let device = builder.build()?;
    let created = state.device_service.create_device(device).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/devices/{id}`
pub async fn replace<DR, LR>(
    State(state): State<AppState<DR, LR>>,
    Path(id): Path<String>,
    payload: Result<Json<ReplaceStatusRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id)?;
    let Json(req) = payload?;
    let device = state
        .device_service
        .replace_status(device_id, req.status)
        .await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `PATCH /api/devices/{id}`
pub async fn patch<DR, LR>(
    State(state): State<AppState<DR, LR>>,
    Path(id): Path<String>,
    payload: Result<Json<PatchDeviceRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id)?;
    let Json(req) = payload?;
    let device = state
        .device_service
        .patch_device(device_id, req.into())
        .await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `DELETE /api/devices/{id}`
pub async fn delete<DR, LR>(
    State(state): State<AppState<DR, LR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}

#[cfg(test)]
mod tests {
    use crate::router;
    use crate::testing::{body_json, json_request, seeded_state, test_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn should_list_devices_in_envelope() {
        let app = router::build(seeded_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/devices")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let devices = body["devices"].as_array().unwrap();
        assert_eq!(devices.len(), 7);
        assert_eq!(devices[0]["name"], "Luz Sala");
        assert_eq!(devices[0]["type"], "light");
        assert_eq!(devices[0]["status"]["power"], false);
    }

    #[tokio::test]
    async fn should_get_device_by_id() {
        let app = router::build(seeded_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/devices/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Puerta Principal");
        assert_eq!(body["status"]["locked"], true);
    }

    #[tokio::test]
    async fn should_return_not_found_with_json_error() {
        let app = router::build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/devices/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Device missing not found");
    }

    #[tokio::test]
    async fn should_create_device_with_default_status() {
        let app = router::build(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/devices",
                &json!({"name": "Desk lamp", "type": "light", "location": "Office"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Desk lamp");
        assert_eq!(body["location"], "Office");
        assert_eq!(
            body["status"],
            json!({"online": true, "power": false, "brightness": 100})
        );
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn should_reject_create_with_unknown_type() {
        let app = router::build(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/devices",
                &json!({"name": "Toaster", "type": "toaster"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn should_reject_create_with_out_of_range_status() {
        let app = router::build(test_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/devices",
                &json!({"name": "Hall", "type": "thermostat", "status": {"target": 45}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_replace_status_on_put() {
        let app = router::build(seeded_state().await);

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/devices/2",
                &json!({"status": {"power": false}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["status"],
            json!({"online": true, "power": false, "brightness": 100})
        );
    }

    #[tokio::test]
    async fn should_merge_top_level_and_nested_fields_on_patch() {
        let app = router::build(seeded_state().await);

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/api/devices/2",
                &json!({"location": "Suite", "power": false, "status": {"brightness": 10}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["location"], "Suite");
        assert_eq!(
            body["status"],
            json!({"online": true, "power": false, "brightness": 10})
        );
    }

    #[tokio::test]
    async fn should_return_not_found_when_patching_missing_device() {
        let app = router::build(test_state());

        let response = app
            .oneshot(json_request("PATCH", "/api/devices/42", &json!({"power": true})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_delete_device() {
        let state = seeded_state().await;

        let response = router::build(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/devices/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router::build(state)
            .oneshot(
                Request::builder()
                    .uri("/api/devices/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
