//! Shared application state for axum handlers.

use std::sync::Arc;

use homedeck_app::ports::{ActivityLogRepository, DeviceRepository};
use homedeck_app::services::activity_service::ActivityService;
use homedeck_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<DR, LR> {
    /// Device CRUD service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Activity log service.
    pub activity_service: Arc<ActivityService<LR>>,
}

impl<DR, LR> Clone for AppState<DR, LR> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            activity_service: Arc::clone(&self.activity_service),
        }
    }
}

impl<DR, LR> AppState<DR, LR>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ActivityLogRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(device_service: DeviceService<DR>, activity_service: ActivityService<LR>) -> Self {
        Self {
            device_service: Arc::new(device_service),
            activity_service: Arc::new(activity_service),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when a service is also needed outside the HTTP layer, for
    /// example to seed the store before serving.
    pub fn from_arcs(
        device_service: Arc<DeviceService<DR>>,
        activity_service: Arc<ActivityService<LR>>,
    ) -> Self {
        Self {
            device_service,
            activity_service,
        }
    }
}
