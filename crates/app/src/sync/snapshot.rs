use std::collections::HashMap;

use homedeck_domain::device::{Device, DeviceType};
use homedeck_domain::id::DeviceId;
use homedeck_domain::sync::{ConnectionStatus, SyncMarker};

/// A device together with its reconciliation marker.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceCard {
    pub device: Device,
    pub marker: SyncMarker,
}

/// All devices of one type, in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub device_type: DeviceType,
    pub devices: Vec<DeviceCard>,
}

impl Section {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Everything a view needs to draw the dashboard once.
///
/// There is always one section per [`DeviceType`], in [`DeviceType::ALL`]
/// order, even when it holds no device.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub connection: ConnectionStatus,
    pub sections: Vec<Section>,
}

impl DashboardSnapshot {
    pub(crate) fn build(
        connection: ConnectionStatus,
        devices: &[Device],
        markers: &HashMap<DeviceId, SyncMarker>,
    ) -> Self {
        let sections = DeviceType::ALL
            .into_iter()
            .map(|device_type| Section {
                device_type,
                devices: devices
                    .iter()
                    .filter(|device| device.device_type() == device_type)
                    .map(|device| DeviceCard {
                        marker: markers.get(&device.id).copied().unwrap_or_default(),
                        device: device.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            connection,
            sections,
        }
    }

    /// The section holding devices of `device_type`.
    #[must_use]
    pub fn section(&self, device_type: DeviceType) -> Option<&Section> {
        self.sections.iter().find(|s| s.device_type == device_type)
    }

    /// Total number of devices across all sections.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.sections.iter().map(|s| s.devices.len()).sum()
    }

    /// Look up a card by device id.
    #[must_use]
    pub fn card(&self, id: &DeviceId) -> Option<&DeviceCard> {
        self.sections
            .iter()
            .flat_map(|s| s.devices.iter())
            .find(|card| &card.device.id == id)
    }
}
