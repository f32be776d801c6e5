//! Device service: server-side use-cases for managing devices.

use homedeck_domain::device::{Device, DeviceStatus, StatusPatch};
use homedeck_domain::error::{HomeDeckError, NotFoundError};
use homedeck_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Partial update of a device. `None` and empty fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    /// Status keys merged into the current status.
    pub status: StatusPatch,
}

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn create_device(&self, device: Device) -> Result<Device, HomeDeckError> {
        device.validate()?;
        self.repo.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, HomeDeckError> {
        let missing = not_found(&id);
        self.repo.get_by_id(id).await?.ok_or(missing)
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, HomeDeckError> {
        self.repo.get_all().await
    }

    /// Replace the whole status of a device. Missing fields take the
    /// defaults of the device's type.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::NotFound`] when the device does not exist,
    /// [`HomeDeckError::Validation`] when a field is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, status))]
    pub async fn replace_status(
        &self,
        id: DeviceId,
        status: StatusPatch,
    ) -> Result<Device, HomeDeckError> {
        let mut device = self.get_device(id).await?;
        device.status = DeviceStatus::from_map(device.device_type(), status)?;
        self.repo.update(device).await
    }

    /// Merge a partial update into an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::NotFound`] when the device does not exist,
    /// [`HomeDeckError::Validation`] when the result violates invariants, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn patch_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, HomeDeckError> {
        let mut device = self.get_device(id).await?;
        if let Some(name) = patch.name {
            device.name = name;
        }
        if let Some(location) = patch.location {
            device.location = location;
        }
        if !patch.status.is_empty() {
            device.status = device.status.merged(&patch.status)?;
        }
        device.validate()?;
        self.repo.update(device).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::NotFound`] when the device does not exist,
    /// or a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), HomeDeckError> {
        let existing = self.get_device(id).await?;
        self.repo.delete(existing.id).await
    }

    /// Insert `devices` when the store holds none. Returns how many devices
    /// were inserted.
    ///
    /// # Errors
    ///
    /// Returns the first validation or storage error encountered.
    #[tracing::instrument(skip(self, devices), fields(count = devices.len()))]
    pub async fn seed_if_empty(&self, devices: Vec<Device>) -> Result<usize, HomeDeckError> {
        if !self.repo.get_all().await?.is_empty() {
            tracing::debug!("device store already populated, skipping seed");
            return Ok(0);
        }
        let count = devices.len();
        for device in devices {
            self.create_device(device).await?;
        }
        tracing::info!(count, "seeded device store");
        Ok(count)
    }
}

fn not_found(id: &DeviceId) -> HomeDeckError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}
