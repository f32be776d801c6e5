use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use homedeck_domain::demo::demo_devices;
use homedeck_domain::device::Device;
use homedeck_domain::id::DeviceId;
use homedeck_domain::sync::{ConnectionStatus, SyncMarker};

use super::snapshot::DashboardSnapshot;

/// Sequence number handed out when a fetch is issued.
///
/// A fetch result is applied only when its ticket is newer than the last
/// applied one, so the most recently issued fetch wins even when responses
/// arrive out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What a completed fetch did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The set was replaced with the fetched devices.
    Updated,
    /// The fetch failed; the previous set was kept.
    Retained,
    /// The fetch failed on an empty set; the demo devices were substituted.
    Fallback,
    /// A newer fetch had already been applied; the result was discarded.
    Stale,
}

#[derive(Debug, Default)]
struct StoreState {
    devices: Vec<Device>,
    markers: HashMap<DeviceId, SyncMarker>,
    /// Writes sent but not yet answered, per device.
    in_flight: HashMap<DeviceId, usize>,
    connection: ConnectionStatus,
    issued: u64,
    applied: u64,
}

/// Shared, cloneable client-side device state.
///
/// Clones share the same state. Every access is a short synchronous
/// critical section, never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct DeviceStore {
    inner: Arc<RwLock<StoreState>>,
}

impl DeviceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve the sequence number of a fetch about to be issued.
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.write();
        state.issued += 1;
        FetchTicket(state.issued)
    }

    /// Replace the device set with a successful fetch result.
    ///
    /// Markers of devices that are gone are dropped. Devices with a write
    /// in flight stay `PendingWrite`, every other device becomes `Synced`.
    pub fn apply_fetch(&self, ticket: FetchTicket, devices: Vec<Device>) -> RefreshOutcome {
        let mut state = self.write();
        if ticket.0 <= state.applied {
            return RefreshOutcome::Stale;
        }
        state.applied = ticket.0;
        let markers: HashMap<_, _> = devices
            .iter()
            .map(|device| {
                let marker = if state.in_flight.contains_key(&device.id) {
                    SyncMarker::PendingWrite
                } else {
                    SyncMarker::Synced
                };
                (device.id.clone(), marker)
            })
            .collect();
        state.markers = markers;
        state.devices = devices;
        state.connection = ConnectionStatus::Online;
        RefreshOutcome::Updated
    }

    /// Record a failed fetch.
    ///
    /// A non-empty set is kept as is. An empty set is replaced by the demo
    /// devices so there is always something to show.
    pub fn apply_fetch_failure(&self, ticket: FetchTicket) -> RefreshOutcome {
        let mut state = self.write();
        if ticket.0 <= state.applied {
            return RefreshOutcome::Stale;
        }
        state.applied = ticket.0;
        if state.devices.is_empty() {
            let devices = demo_devices();
            state.markers = devices
                .iter()
                .map(|device| (device.id.clone(), SyncMarker::Synced))
                .collect();
            state.devices = devices;
            state.connection = ConnectionStatus::Demo;
            return RefreshOutcome::Fallback;
        }
        if state.connection != ConnectionStatus::Demo {
            state.connection = ConnectionStatus::Offline;
        }
        RefreshOutcome::Retained
    }

    /// Note a write about to be sent for `id` and mark it `PendingWrite`.
    ///
    /// Returns `false`, and records nothing, for an unknown id.
    pub fn begin_write(&self, id: &DeviceId) -> bool {
        let mut state = self.write();
        let StoreState {
            markers, in_flight, ..
        } = &mut *state;
        let Some(slot) = markers.get_mut(id) else {
            return false;
        };
        *slot = SyncMarker::PendingWrite;
        *in_flight.entry(id.clone()).or_default() += 1;
        true
    }

    /// Note that one write on `id` was answered.
    ///
    /// The marker is left untouched: a successful write is confirmed by the
    /// next applied fetch, a failed one is marked by the caller.
    pub fn finish_write(&self, id: &DeviceId) {
        let mut state = self.write();
        let in_flight = &mut state.in_flight;
        if let Some(count) = in_flight.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                in_flight.remove(id);
            }
        }
    }

    /// Set the marker of a device. Unknown ids are ignored.
    pub fn mark(&self, id: &DeviceId, marker: SyncMarker) -> bool {
        let mut state = self.write();
        match state.markers.get_mut(id) {
            Some(slot) => {
                *slot = marker;
                true
            }
            None => false,
        }
    }

    /// A copy of the device with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<Device> {
        self.read().devices.iter().find(|d| &d.id == id).cloned()
    }

    /// A copy of the whole device set, in store order.
    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        self.read().devices.clone()
    }

    #[must_use]
    pub fn marker(&self, id: &DeviceId) -> Option<SyncMarker> {
        self.read().markers.get(id).copied()
    }

    #[must_use]
    pub fn connection(&self) -> ConnectionStatus {
        self.read().connection
    }

    /// Group the current state into a renderable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.read();
        DashboardSnapshot::build(state.connection, &state.devices, &state.markers)
    }
}
