//! Activity service: records and lists what happened to devices.

use homedeck_domain::activity::{ActivityLog, ActivityLogBuilder, NewActivity, RECENT_LIMIT};
use homedeck_domain::error::HomeDeckError;

use crate::ports::ActivityLogRepository;

/// Application service for the activity log.
pub struct ActivityService<R> {
    repo: R,
}

impl<R: ActivityLogRepository> ActivityService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stamp and persist a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] when the action is blank, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, activity), fields(device_id = %activity.device_id, action = %activity.action))]
    pub async fn record(&self, activity: NewActivity) -> Result<ActivityLog, HomeDeckError> {
        let log = ActivityLogBuilder::from_new(activity).build()?;
        self.repo.append(log).await
    }

    /// The [`RECENT_LIMIT`] most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn recent(&self) -> Result<Vec<ActivityLog>, HomeDeckError> {
        self.repo.get_recent(RECENT_LIMIT).await
    }
}
