//! Device kinds and their type-specific status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// A partial (or full) status expressed as a JSON field map, as exchanged
/// with remote stores.
pub type StatusPatch = serde_json::Map<String, Value>;

/// Lowest thermostat target accepted, in °C.
pub const MIN_TARGET_CELSIUS: f64 = 15.0;
/// Highest thermostat target accepted, in °C.
pub const MAX_TARGET_CELSIUS: f64 = 30.0;
/// Highest light brightness, in percent.
pub const MAX_BRIGHTNESS: u8 = 100;

/// The supported kinds of device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Light,
    Lock,
    Thermostat,
    #[serde(alias = "motion")]
    MotionSensor,
    Camera,
}

impl DeviceType {
    /// Every device type, in dashboard section order.
    pub const ALL: [Self; 5] = [
        Self::Light,
        Self::Lock,
        Self::Thermostat,
        Self::MotionSensor,
        Self::Camera,
    ];

    /// Wire name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Lock => "lock",
            Self::Thermostat => "thermostat",
            Self::MotionSensor => "motion_sensor",
            Self::Camera => "camera",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "lock" => Ok(Self::Lock),
            "thermostat" => Ok(Self::Thermostat),
            "motion_sensor" | "motion" => Ok(Self::MotionSensor),
            "camera" => Ok(Self::Camera),
            other => Err(ValidationError::UnknownDeviceType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightStatus {
    pub online: bool,
    pub power: bool,
    pub brightness: u8,
}

impl Default for LightStatus {
    fn default() -> Self {
        Self {
            online: true,
            power: false,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockStatus {
    pub online: bool,
    pub locked: bool,
}

impl Default for LockStatus {
    fn default() -> Self {
        Self {
            online: true,
            locked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermostatStatus {
    pub online: bool,
    /// Measured temperature, in °C.
    pub temperature: f64,
    /// Requested temperature, in °C.
    pub target: f64,
}

impl Default for ThermostatStatus {
    fn default() -> Self {
        Self {
            online: true,
            temperature: 20.0,
            target: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSensorStatus {
    pub online: bool,
    pub motion_detected: bool,
}

impl Default for MotionSensorStatus {
    fn default() -> Self {
        Self {
            online: true,
            motion_detected: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraStatus {
    pub online: bool,
    pub recording: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_url: Option<String>,
}

impl Default for CameraStatus {
    fn default() -> Self {
        Self {
            online: true,
            recording: false,
            camera_url: None,
        }
    }
}

/// A device's status, tagged by its kind.
///
/// Each variant carries only the fields meaningful for that kind. On the
/// wire the tag is the device `type` and the payload is the `status` map.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceStatus {
    Light(LightStatus),
    Lock(LockStatus),
    Thermostat(ThermostatStatus),
    MotionSensor(MotionSensorStatus),
    Camera(CameraStatus),
}

impl DeviceStatus {
    /// The default status of a freshly registered device of `device_type`.
    #[must_use]
    pub fn default_for(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Light => Self::Light(LightStatus::default()),
            DeviceType::Lock => Self::Lock(LockStatus::default()),
            DeviceType::Thermostat => Self::Thermostat(ThermostatStatus::default()),
            DeviceType::MotionSensor => Self::MotionSensor(MotionSensorStatus::default()),
            DeviceType::Camera => Self::Camera(CameraStatus::default()),
        }
    }

    /// Kind of device this status belongs to.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Light(_) => DeviceType::Light,
            Self::Lock(_) => DeviceType::Lock,
            Self::Thermostat(_) => DeviceType::Thermostat,
            Self::MotionSensor(_) => DeviceType::MotionSensor,
            Self::Camera(_) => DeviceType::Camera,
        }
    }

    /// Whether the device reports itself reachable.
    #[must_use]
    pub fn is_online(&self) -> bool {
        match self {
            Self::Light(s) => s.online,
            Self::Lock(s) => s.online,
            Self::Thermostat(s) => s.online,
            Self::MotionSensor(s) => s.online,
            Self::Camera(s) => s.online,
        }
    }

    /// Parse a wire status map for the given kind.
    ///
    /// Missing fields take their defaults and unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatus`] when a known field has the
    /// wrong JSON type or an out-of-range value.
    pub fn from_map(device_type: DeviceType, map: StatusPatch) -> Result<Self, ValidationError> {
        let value = Value::Object(map);
        let status = match device_type {
            DeviceType::Light => serde_json::from_value(value).map(Self::Light),
            DeviceType::Lock => serde_json::from_value(value).map(Self::Lock),
            DeviceType::Thermostat => serde_json::from_value(value).map(Self::Thermostat),
            DeviceType::MotionSensor => serde_json::from_value(value).map(Self::MotionSensor),
            DeviceType::Camera => serde_json::from_value(value).map(Self::Camera),
        }
        .map_err(|err| ValidationError::InvalidStatus {
            field: "status".to_string(),
            reason: err.to_string(),
        })?;
        status.validate()?;
        Ok(status)
    }

    /// Read a status as reported by a remote store, never failing.
    ///
    /// A non-object `value` counts as an empty map. Fields of the wrong JSON
    /// type take their defaults, brightness is rounded and clamped to
    /// 0..=[`MAX_BRIGHTNESS`], and temperatures are kept as received.
    #[must_use]
    pub fn from_remote(device_type: DeviceType, value: &Value) -> Self {
        let empty = StatusPatch::new();
        let map = value.as_object().unwrap_or(&empty);
        let online = flag(map, "online", true);
        match device_type {
            DeviceType::Light => {
                let defaults = LightStatus::default();
                Self::Light(LightStatus {
                    online,
                    power: flag(map, "power", defaults.power),
                    brightness: number(map, "brightness").map_or(defaults.brightness, brightness),
                })
            }
            DeviceType::Lock => Self::Lock(LockStatus {
                online,
                locked: flag(map, "locked", false),
            }),
            DeviceType::Thermostat => {
                let defaults = ThermostatStatus::default();
                Self::Thermostat(ThermostatStatus {
                    online,
                    temperature: number(map, "temperature").unwrap_or(defaults.temperature),
                    target: number(map, "target").unwrap_or(defaults.target),
                })
            }
            DeviceType::MotionSensor => Self::MotionSensor(MotionSensorStatus {
                online,
                motion_detected: flag(map, "motion_detected", false),
            }),
            DeviceType::Camera => Self::Camera(CameraStatus {
                online,
                recording: flag(map, "recording", false),
                camera_url: map
                    .get("camera_url")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
        }
    }

    /// Render the status as a wire field map.
    #[must_use]
    pub fn to_map(&self) -> StatusPatch {
        let mut map = StatusPatch::new();
        map.insert("online".to_string(), self.is_online().into());
        match self {
            Self::Light(s) => {
                map.insert("power".to_string(), s.power.into());
                map.insert("brightness".to_string(), s.brightness.into());
            }
            Self::Lock(s) => {
                map.insert("locked".to_string(), s.locked.into());
            }
            Self::Thermostat(s) => {
                map.insert("temperature".to_string(), s.temperature.into());
                map.insert("target".to_string(), s.target.into());
            }
            Self::MotionSensor(s) => {
                map.insert("motion_detected".to_string(), s.motion_detected.into());
            }
            Self::Camera(s) => {
                map.insert("recording".to_string(), s.recording.into());
                if let Some(url) = &s.camera_url {
                    map.insert("camera_url".to_string(), url.clone().into());
                }
            }
        }
        map
    }

    /// Overlay `patch` on the current status and re-validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatus`] if the merged status does
    /// not parse for this kind or violates a range.
    pub fn merged(&self, patch: &StatusPatch) -> Result<Self, ValidationError> {
        let mut map = self.to_map();
        for (key, value) in patch {
            map.insert(key.clone(), value.clone());
        }
        Self::from_map(self.device_type(), map)
    }

    /// Check per-kind range invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatus`] when brightness exceeds
    /// [`MAX_BRIGHTNESS`] or a thermostat target falls outside
    /// [`MIN_TARGET_CELSIUS`]..=[`MAX_TARGET_CELSIUS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Light(s) if s.brightness > MAX_BRIGHTNESS => {
                Err(ValidationError::InvalidStatus {
                    field: "brightness".to_string(),
                    reason: format!("must be between 0 and {MAX_BRIGHTNESS}"),
                })
            }
            Self::Thermostat(s)
                if !(MIN_TARGET_CELSIUS..=MAX_TARGET_CELSIUS).contains(&s.target) =>
            {
                Err(ValidationError::InvalidStatus {
                    field: "target".to_string(),
                    reason: format!(
                        "must be between {MIN_TARGET_CELSIUS} and {MAX_TARGET_CELSIUS}"
                    ),
                })
            }
            _ => Ok(()),
        }
    }
}

fn flag(map: &StatusPatch, key: &str, default: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// A finite number, also accepted as a numeric string.
fn number(map: &StatusPatch, key: &str) -> Option<f64> {
    let value = match map.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    value.filter(|n: &f64| n.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn brightness(value: f64) -> u8 {
    value.round().clamp(0.0, f64::from(MAX_BRIGHTNESS)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> StatusPatch {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn should_parse_type_aliases() {
        assert_eq!("motion".parse::<DeviceType>(), Ok(DeviceType::MotionSensor));
        assert_eq!(
            "motion_sensor".parse::<DeviceType>(),
            Ok(DeviceType::MotionSensor)
        );
    }

    #[test]
    fn should_reject_unknown_type() {
        assert_eq!(
            "toaster".parse::<DeviceType>(),
            Err(ValidationError::UnknownDeviceType("toaster".to_string()))
        );
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let status = DeviceStatus::from_map(DeviceType::Light, map(json!({"power": true}))).unwrap();
        assert_eq!(
            status,
            DeviceStatus::Light(LightStatus {
                online: true,
                power: true,
                brightness: 100,
            })
        );
    }

    #[test]
    fn should_ignore_unknown_status_fields() {
        let status = DeviceStatus::from_map(
            DeviceType::Lock,
            map(json!({"locked": true, "battery": 80})),
        )
        .unwrap();
        assert_eq!(
            status,
            DeviceStatus::Lock(LockStatus {
                online: true,
                locked: true,
            })
        );
    }

    #[test]
    fn should_reject_field_with_wrong_type() {
        let result = DeviceStatus::from_map(DeviceType::Lock, map(json!({"locked": "yes"})));
        assert!(matches!(result, Err(ValidationError::InvalidStatus { .. })));
    }

    #[test]
    fn should_reject_brightness_above_maximum() {
        let result = DeviceStatus::from_map(DeviceType::Light, map(json!({"brightness": 150})));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidStatus { field, .. }) if field == "brightness"
        ));
    }

    #[test]
    fn should_reject_target_outside_range() {
        let result = DeviceStatus::from_map(DeviceType::Thermostat, map(json!({"target": 31})));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidStatus { field, .. }) if field == "target"
        ));
    }

    #[test]
    fn should_round_and_clamp_remote_brightness() {
        let status = DeviceStatus::from_remote(DeviceType::Light, &json!({"brightness": 50.5}));
        assert_eq!(
            status,
            DeviceStatus::Light(LightStatus {
                online: true,
                power: false,
                brightness: 51,
            })
        );

        let status = DeviceStatus::from_remote(DeviceType::Light, &json!({"brightness": 400}));
        assert!(matches!(status, DeviceStatus::Light(s) if s.brightness == 100));
    }

    #[test]
    fn should_keep_remote_target_outside_command_range() {
        let status = DeviceStatus::from_remote(
            DeviceType::Thermostat,
            &json!({"temperature": "21.5", "target": 32}),
        );
        assert_eq!(
            status,
            DeviceStatus::Thermostat(ThermostatStatus {
                online: true,
                temperature: 21.5,
                target: 32.0,
            })
        );
    }

    #[test]
    fn should_default_every_field_when_remote_status_is_not_an_object() {
        for value in [json!(false), json!(null), json!("on"), json!([1, 2])] {
            assert_eq!(
                DeviceStatus::from_remote(DeviceType::Camera, &value),
                DeviceStatus::default_for(DeviceType::Camera)
            );
        }
    }

    #[test]
    fn should_default_remote_fields_with_wrong_type() {
        let status = DeviceStatus::from_remote(
            DeviceType::Lock,
            &json!({"online": "yes", "locked": true}),
        );
        assert_eq!(
            status,
            DeviceStatus::Lock(LockStatus {
                online: true,
                locked: true,
            })
        );
    }

    #[test]
    fn should_merge_patch_over_current_status() {
        let current = DeviceStatus::Thermostat(ThermostatStatus {
            online: true,
            temperature: 21.5,
            target: 22.0,
        });
        let merged = current.merged(&map(json!({"target": 25}))).unwrap();
        assert_eq!(
            merged,
            DeviceStatus::Thermostat(ThermostatStatus {
                online: true,
                temperature: 21.5,
                target: 25.0,
            })
        );
    }

    #[test]
    fn should_keep_kind_when_merging() {
        let current = DeviceStatus::default_for(DeviceType::Camera);
        let merged = current.merged(&map(json!({"power": true}))).unwrap();
        assert_eq!(merged.device_type(), DeviceType::Camera);
    }

    #[test]
    fn should_render_only_fields_of_its_kind() {
        let status = DeviceStatus::default_for(DeviceType::MotionSensor);
        assert_eq!(
            Value::Object(status.to_map()),
            json!({"online": true, "motion_detected": false})
        );
    }

    #[test]
    fn should_render_camera_url_when_present() {
        let status = DeviceStatus::Camera(CameraStatus {
            online: true,
            recording: true,
            camera_url: Some("rtsp://10.0.0.5/stream1".to_string()),
        });
        assert_eq!(
            status.to_map().get("camera_url"),
            Some(&json!("rtsp://10.0.0.5/stream1"))
        );
    }
}
