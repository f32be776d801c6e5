//! Commands: user intents against a single device, with their domain clamps.

use serde_json::Value;

use crate::device::{
    DeviceType, MAX_BRIGHTNESS, MAX_TARGET_CELSIUS, MIN_TARGET_CELSIUS, StatusPatch,
};
use crate::error::ValidationError;

/// A status change requested by the user.
///
/// Values are clamped when the command is constructed, so a [`Command`]
/// always produces an in-range patch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPower(bool),
    SetBrightness(u8),
    SetLocked(bool),
    SetTarget(f64),
    SetRecording(bool),
}

impl Command {
    /// Turn a light on or off.
    #[must_use]
    pub fn toggle_light(power: bool) -> Self {
        Self::SetPower(power)
    }

    /// Lock or unlock a lock.
    #[must_use]
    pub fn toggle_lock(locked: bool) -> Self {
        Self::SetLocked(locked)
    }

    /// Start or stop a camera recording.
    #[must_use]
    pub fn toggle_camera(recording: bool) -> Self {
        Self::SetRecording(recording)
    }

    /// Set a thermostat target, clamped to
    /// [`MIN_TARGET_CELSIUS`]..=[`MAX_TARGET_CELSIUS`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatus`] when `target` is not finite.
    pub fn adjust_temperature(target: f64) -> Result<Self, ValidationError> {
        if !target.is_finite() {
            return Err(ValidationError::InvalidStatus {
                field: "target".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        Ok(Self::SetTarget(
            target.clamp(MIN_TARGET_CELSIUS, MAX_TARGET_CELSIUS),
        ))
    }

    /// Set a light brightness from user input.
    ///
    /// The input is parsed as an integer (a decimal part is truncated) and
    /// clamped to `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidBrightness`] when `raw` is not a
    /// number.
    pub fn update_brightness(raw: &str) -> Result<Self, ValidationError> {
        let value = parse_integer(raw)
            .ok_or_else(|| ValidationError::InvalidBrightness(raw.to_string()))?;
        let clamped = value.clamp(0, i64::from(MAX_BRIGHTNESS));
        Ok(Self::SetBrightness(
            u8::try_from(clamped).unwrap_or(MAX_BRIGHTNESS),
        ))
    }

    /// Kind of device this command targets.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::SetPower(_) | Self::SetBrightness(_) => DeviceType::Light,
            Self::SetLocked(_) => DeviceType::Lock,
            Self::SetTarget(_) => DeviceType::Thermostat,
            Self::SetRecording(_) => DeviceType::Camera,
        }
    }

    /// Name recorded in the activity log (the changed status field).
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::SetPower(_) => "power",
            Self::SetBrightness(_) => "brightness",
            Self::SetLocked(_) => "locked",
            Self::SetTarget(_) => "target",
            Self::SetRecording(_) => "recording",
        }
    }

    /// The partial status this command applies.
    #[must_use]
    pub fn patch(&self) -> StatusPatch {
        let value: Value = match self {
            Self::SetPower(v) | Self::SetLocked(v) | Self::SetRecording(v) => (*v).into(),
            Self::SetBrightness(v) => (*v).into(),
            Self::SetTarget(v) => (*v).into(),
        };
        let mut patch = StatusPatch::new();
        patch.insert(self.action().to_string(), value);
        patch
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}
