//! Device: a controllable smart-home thing with a kind-specific status.

mod status;

pub use status::{
    CameraStatus, DeviceStatus, DeviceType, LightStatus, LockStatus, MAX_BRIGHTNESS,
    MAX_TARGET_CELSIUS, MIN_TARGET_CELSIUS, MotionSensorStatus, StatusPatch, ThermostatStatus,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HomeDeckError, ValidationError};
use crate::id::DeviceId;

/// A device as seen by the dashboard.
///
/// Serializes as the wire record `{ id, name, type, location, status }`.
/// Deserializing reads the status leniently (see
/// [`DeviceStatus::from_remote`]), so any record of a known type decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DeviceRecord", into = "DeviceRecord")]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub location: String,
    pub status: DeviceStatus,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Kind of this device.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.status.device_type()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] when `name` is empty or the
    /// status violates its ranges.
    pub fn validate(&self) -> Result<(), HomeDeckError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.status.validate()?;
        Ok(())
    }
}

/// Wire representation of a [`Device`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Value,
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        Self {
            status: DeviceStatus::from_remote(record.device_type, &record.status),
            id: record.id,
            name: record.name,
            location: record.location.unwrap_or_default(),
        }
    }
}

impl From<Device> for DeviceRecord {
    fn from(device: Device) -> Self {
        Self {
            device_type: device.device_type(),
            status: Value::Object(device.status.to_map()),
            id: device.id,
            name: device.name,
            location: Some(device.location),
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    location: Option<String>,
    status: Option<DeviceStatus>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Use the default status of `device_type`.
    #[must_use]
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.status = Some(DeviceStatus::default_for(device_type));
        self
    }

    #[must_use]
    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// A random id is generated when none was given.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] if `name` is missing or empty,
    /// if neither a type nor a status was given, or if the status is out of
    /// range.
    pub fn build(self) -> Result<Device, HomeDeckError> {
        let status = self.status.ok_or_else(|| ValidationError::InvalidStatus {
            field: "type".to_string(),
            reason: "device type is required".to_string(),
        })?;
        let device = Device {
            id: self.id.unwrap_or_else(DeviceId::generate),
            name: self.name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            status,
        };
        device.validate()?;
        Ok(device)
    }
}
