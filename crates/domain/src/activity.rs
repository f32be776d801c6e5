//! Activity log: an append-only record of commands applied to devices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HomeDeckError, ValidationError};
use crate::id::{ActivityLogId, DeviceId};

/// UTC timestamp used for activity records.
pub type Timestamp = DateTime<Utc>;

/// Maximum number of entries returned when listing recent activity.
pub const RECENT_LIMIT: usize = 50;

/// A single activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub device_id: DeviceId,
    /// What changed, e.g. `"power"` or `"target"`.
    pub action: String,
    /// Free-form detail, usually the JSON of the applied patch.
    pub details: Option<String>,
    pub created_at: Timestamp,
}

impl ActivityLog {
    /// Create a builder for constructing an [`ActivityLog`].
    #[must_use]
    pub fn builder() -> ActivityLogBuilder {
        ActivityLogBuilder::default()
    }
}

/// An activity entry before the store assigns its identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub device_id: DeviceId,
    pub action: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Step-by-step builder for [`ActivityLog`].
#[derive(Debug, Default)]
pub struct ActivityLogBuilder {
    id: Option<ActivityLogId>,
    device_id: Option<DeviceId>,
    action: Option<String>,
    details: Option<String>,
    created_at: Option<Timestamp>,
}

impl ActivityLogBuilder {
    #[must_use]
    pub fn id(mut self, id: ActivityLogId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Start from a [`NewActivity`].
    #[must_use]
    pub fn from_new(new: NewActivity) -> Self {
        Self {
            device_id: Some(new.device_id),
            action: Some(new.action),
            details: new.details,
            ..Self::default()
        }
    }

    /// Consume the builder, validate, and return an [`ActivityLog`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] when the device id or the
    /// action is missing.
    pub fn build(self) -> Result<ActivityLog, HomeDeckError> {
        let device_id = self.device_id.ok_or(ValidationError::EmptyId)?;
        let action = self
            .action
            .filter(|a| !a.trim().is_empty())
            .ok_or(ValidationError::EmptyAction)?;
        Ok(ActivityLog {
            id: self.id.unwrap_or_default(),
            device_id,
            action,
            details: self.details,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}
