//! Axum router assembly.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use homedeck_app::ports::{ActivityLogRepository, DeviceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes (including the `/api/health` probe) under `/api`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem, and a permissive
/// [`CorsLayer`] so browser dashboards served from other origins can poll
/// the API.
pub fn build<DR, LR>(state: AppState<DR, LR>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    Router::new()
        .nest("/api", crate::api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
