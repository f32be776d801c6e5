use std::sync::Arc;
use std::time::Duration;

use homedeck_domain::activity::NewActivity;
use homedeck_domain::command::Command;
use homedeck_domain::device::StatusPatch;
use homedeck_domain::error::HomeDeckError;
use homedeck_domain::id::DeviceId;
use homedeck_domain::sync::SyncMarker;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::store::{DeviceStore, RefreshOutcome};
use crate::ports::{DeviceSource, DeviceView};

/// Default period between two polls of the remote source.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// What happened to a user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The target device is not in the local set, or is of another type.
    /// Nothing was sent.
    Ignored,
    /// The remote store accepted the write and the set was refreshed.
    Confirmed,
    /// The write failed. The device keeps its last confirmed status and is
    /// marked [`SyncMarker::WriteFailed`].
    Failed,
}

/// Handle to the background polling task started by
/// [`Synchronizer::schedule_refresh`].
///
/// Dropping the handle does not stop polling; call [`PollHandle::cancel`].
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling and wait for the task to wind down.
    pub async fn cancel(self) {
        self.task.abort();
        // The only possible outcome is a cancellation error.
        let _ = self.task.await;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Reconciles a [`DeviceStore`] with a [`DeviceSource`] and renders every
/// change on a [`DeviceView`].
pub struct Synchronizer<S, V> {
    source: S,
    view: V,
    store: DeviceStore,
}

impl<S: DeviceSource, V: DeviceView> Synchronizer<S, V> {
    pub fn new(source: S, view: V, store: DeviceStore) -> Self {
        Self {
            source,
            view,
            store,
        }
    }

    pub fn store(&self) -> &DeviceStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn render(&self) {
        self.view.render(&self.store.snapshot());
    }

    /// Fetch the full device set and reconcile the store with it.
    ///
    /// Never fails: fetch errors are logged and recovered from, and the
    /// view is rendered whatever the outcome.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.store.begin_fetch();
        let outcome = match self.source.fetch_devices().await {
            Ok(devices) => self.store.apply_fetch(ticket, devices),
            Err(err) => {
                tracing::warn!(error = ?err, "failed to fetch devices");
                self.store.apply_fetch_failure(ticket)
            }
        };
        match outcome {
            RefreshOutcome::Stale => tracing::debug!("discarded stale fetch result"),
            RefreshOutcome::Fallback => tracing::info!("showing demo devices"),
            RefreshOutcome::Updated | RefreshOutcome::Retained => {}
        }
        self.render();
        outcome
    }

    /// Refresh now, then every `interval` until the returned handle is
    /// cancelled.
    ///
    /// Must be called from within a tokio runtime. Panics if `interval` is
    /// zero.
    pub fn schedule_refresh(self: &Arc<Self>, interval: Duration) -> PollHandle
    where
        S: 'static,
        V: 'static,
    {
        let this = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                this.refresh().await;
            }
        });
        tracing::debug!(?interval, "polling started");
        PollHandle { task }
    }

    /// Merge `patch` into the status of device `id` and write it remotely.
    ///
    /// The local device is never changed directly: on success the store is
    /// refreshed from the source, and that refresh clears the
    /// [`SyncMarker::PendingWrite`] marker once no other write on the device
    /// is in flight. On failure the device is marked
    /// [`SyncMarker::WriteFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] when the merged status is
    /// invalid. Nothing is sent in that case.
    #[tracing::instrument(skip(self, patch))]
    pub async fn apply_command(
        &self,
        id: &DeviceId,
        patch: &StatusPatch,
    ) -> Result<CommandOutcome, HomeDeckError> {
        let Some(device) = self.store.get(id) else {
            tracing::debug!("ignoring command for unknown device");
            return Ok(CommandOutcome::Ignored);
        };
        let status = device.status.merged(patch)?;

        self.store.begin_write(id);
        self.render();

        let written = self.source.write_status(id, &status).await;
        self.store.finish_write(id);
        match written {
            Ok(()) => {
                self.record_activity(id, patch).await;
                self.refresh().await;
                Ok(CommandOutcome::Confirmed)
            }
            Err(err) => {
                tracing::warn!(error = ?err, "failed to write device status");
                self.store.mark(id, SyncMarker::WriteFailed);
                self.render();
                Ok(CommandOutcome::Failed)
            }
        }
    }

    async fn record_activity(&self, id: &DeviceId, patch: &StatusPatch) {
        let action = patch
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "update".to_string());
        let details = serde_json::to_string(patch).ok();
        let activity = NewActivity {
            device_id: id.clone(),
            action,
            details,
        };
        if let Err(err) = self.source.record_activity(activity).await {
            tracing::warn!(error = ?err, "failed to record activity");
        }
    }

    /// Apply a typed [`Command`], ignoring it when the device is of another
    /// type.
    ///
    /// # Errors
    ///
    /// See [`Synchronizer::apply_command`].
    pub async fn execute(
        &self,
        id: &DeviceId,
        command: Command,
    ) -> Result<CommandOutcome, HomeDeckError> {
        if let Some(device) = self.store.get(id)
            && device.device_type() != command.device_type()
        {
            tracing::debug!(
                device_id = %id,
                device_type = %device.device_type(),
                action = command.action(),
                "ignoring command for device of another type"
            );
            return Ok(CommandOutcome::Ignored);
        }
        self.apply_command(id, &command.patch()).await
    }

    /// Turn a light on or off.
    ///
    /// # Errors
    ///
    /// See [`Synchronizer::apply_command`].
    pub async fn toggle_light(
        &self,
        id: &DeviceId,
        power: bool,
    ) -> Result<CommandOutcome, HomeDeckError> {
        self.execute(id, Command::toggle_light(power)).await
    }

    /// Lock or unlock a lock.
    ///
    /// # Errors
    ///
    /// See [`Synchronizer::apply_command`].
    pub async fn toggle_lock(
        &self,
        id: &DeviceId,
        locked: bool,
    ) -> Result<CommandOutcome, HomeDeckError> {
        self.execute(id, Command::toggle_lock(locked)).await
    }

    /// Set a thermostat target, clamped to 15..=30 °C.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] when `target` is not finite.
    pub async fn adjust_temperature(
        &self,
        id: &DeviceId,
        target: f64,
    ) -> Result<CommandOutcome, HomeDeckError> {
        let command = Command::adjust_temperature(target)?;
        self.execute(id, command).await
    }

    /// Start or stop a camera recording.
    ///
    /// # Errors
    ///
    /// See [`Synchronizer::apply_command`].
    pub async fn toggle_camera(
        &self,
        id: &DeviceId,
        recording: bool,
    ) -> Result<CommandOutcome, HomeDeckError> {
        self.execute(id, Command::toggle_camera(recording)).await
    }

    /// Set a light brightness from raw user input, clamped to 0..=100.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDeckError::Validation`] when `raw` is not a number.
    pub async fn update_brightness(
        &self,
        id: &DeviceId,
        raw: &str,
    ) -> Result<CommandOutcome, HomeDeckError> {
        let command = Command::update_brightness(raw)?;
        self.execute(id, command).await
    }
}
