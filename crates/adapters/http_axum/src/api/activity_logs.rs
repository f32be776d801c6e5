//! JSON REST handlers for the activity log.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedeck_app::ports::{ActivityLogRepository, DeviceRepository};
use homedeck_domain::activity::{ActivityLog, NewActivity};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of the list endpoint.
#[derive(Serialize)]
pub struct ActivityLogList {
    pub logs: Vec<ActivityLog>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ActivityLogList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<ActivityLog>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/activity-logs`
pub async fn list<DR, LR>(
    State(state): State<AppState<DR, LR>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let logs = state.activity_service.recent().await?;
    Ok(ListResponse::Ok(Json(ActivityLogList { logs })))
}

/// `POST /api/activity-logs`
pub async fn create<DR, LR>(
    State(state): State<AppState<DR, LR>>,
    payload: Result<Json<NewActivity>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    let Json(activity) = payload?;
    let log = state.activity_service.record(activity).await?;
    Ok(CreateResponse::Created(Json(log)))
}
