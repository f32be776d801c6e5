//! The fixed demo device set.
//!
//! Shown when the dashboard has never received devices from its backend, and
//! optionally seeded into an empty server store.

use crate::device::{
    CameraStatus, Device, DeviceStatus, LightStatus, LockStatus, MotionSensorStatus,
    ThermostatStatus,
};
use crate::id::DeviceId;

fn device(id: &str, name: &str, location: &str, status: DeviceStatus) -> Device {
    Device {
        id: DeviceId::trusted(id),
        name: name.to_string(),
        location: location.to_string(),
        status,
    }
}

/// The seven demo devices, ids `"1"` through `"7"`.
#[must_use]
pub fn demo_devices() -> Vec<Device> {
    vec![
        device(
            "1",
            "Luz Sala",
            "Sala",
            DeviceStatus::Light(LightStatus {
                online: true,
                power: false,
                brightness: 100,
            }),
        ),
        device(
            "2",
            "Luz Dormitorio",
            "Dormitorio",
            DeviceStatus::Light(LightStatus {
                online: true,
                power: true,
                brightness: 50,
            }),
        ),
        device(
            "3",
            "Puerta Principal",
            "Entrada",
            DeviceStatus::Lock(LockStatus {
                online: true,
                locked: true,
            }),
        ),
        device(
            "4",
            "Puerta Garage",
            "Garage",
            DeviceStatus::Lock(LockStatus {
                online: true,
                locked: false,
            }),
        ),
        device(
            "5",
            "Termostato Principal",
            "Sala",
            DeviceStatus::Thermostat(ThermostatStatus {
                online: true,
                temperature: 22.0,
                target: 22.0,
            }),
        ),
        device(
            "6",
            "Sensor Entrada",
            "Entrada",
            DeviceStatus::MotionSensor(MotionSensorStatus {
                online: true,
                motion_detected: false,
            }),
        ),
        device(
            "7",
            "Cámara Entrada",
            "Entrada",
            DeviceStatus::Camera(CameraStatus {
                online: true,
                recording: true,
                camera_url: None,
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceType;
    use std::collections::HashSet;

    #[test]
    fn should_contain_seven_devices_with_unique_ids() {
        let devices = demo_devices();
        assert_eq!(devices.len(), 7);
        let ids: HashSet<_> = devices.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn should_cover_every_device_type() {
        let devices = demo_devices();
        for device_type in DeviceType::ALL {
            assert!(
                devices.iter().any(|d| d.device_type() == device_type),
                "missing {device_type}"
            );
        }
    }

    #[test]
    fn should_use_the_known_names() {
        let names: Vec<String> = demo_devices().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "Luz Sala",
                "Luz Dormitorio",
                "Puerta Principal",
                "Puerta Garage",
                "Termostato Principal",
                "Sensor Entrada",
                "Cámara Entrada",
            ]
        );
    }

    #[test]
    fn should_pass_validation() {
        for device in demo_devices() {
            assert!(device.validate().is_ok(), "{} is invalid", device.name);
        }
    }
}
