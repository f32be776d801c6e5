//! Storage port: repository traits for server-side persistence.

use std::future::Future;

use homedeck_domain::activity::ActivityLog;
use homedeck_domain::device::Device;
use homedeck_domain::error::HomeDeckError;
use homedeck_domain::id::DeviceId;

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Persist a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HomeDeckError>> + Send;

    /// Get a device by its identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HomeDeckError>> + Send;

    /// Get all devices, in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HomeDeckError>> + Send;

    /// Overwrite an existing device.
    ///
    /// Implementations return [`HomeDeckError::NotFound`] when no device has
    /// the same id.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, HomeDeckError>> + Send;

    /// Delete a device by id.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HomeDeckError>> + Send;
}

/// Append-only repository for [`ActivityLog`] entries.
pub trait ActivityLogRepository {
    /// Persist a new entry.
    fn append(
        &self,
        log: ActivityLog,
    ) -> impl Future<Output = Result<ActivityLog, HomeDeckError>> + Send;

    /// Get the most recent entries, ordered newest-first.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActivityLog>, HomeDeckError>> + Send;
}
