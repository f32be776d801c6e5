//! Commands typed at the dashboard prompt.

use std::str::FromStr;

use homedeck_domain::id::DeviceId;

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  light <id> on|off          switch a light
  brightness <id> <0-100>    set a light's brightness
  lock <id> lock|unlock      lock or unlock a door
  temp <id> <celsius>        set a thermostat target (15-30)
  camera <id> on|off         start or stop recording
  refresh                    fetch devices now
  help                       show this help
  quit                       exit";

const LIGHT_USAGE: &str = "light <id> on|off";
const BRIGHTNESS_USAGE: &str = "brightness <id> <0-100>";
const LOCK_USAGE: &str = "lock <id> lock|unlock";
const TEMP_USAGE: &str = "temp <id> <celsius>";
const CAMERA_USAGE: &str = "camera <id> on|off";

/// A parsed dashboard command.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    Light { id: DeviceId, power: bool },
    /// The raw value is kept; clamping happens when the command is built.
    Brightness { id: DeviceId, value: String },
    Lock { id: DeviceId, locked: bool },
    Temperature { id: DeviceId, target: f64 },
    Camera { id: DeviceId, recording: bool },
    Refresh,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no command given")]
    Empty,

    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0:?} is not a number")]
    InvalidNumber(String),
}

fn switch(value: &str, on: &str, off: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case(on) {
        Some(true)
    } else if value.eq_ignore_ascii_case(off) {
        Some(false)
    } else {
        None
    }
}

/// Split the arguments of a `<command> <id> <value>` line.
fn id_and_value<'a>(
    args: &[&'a str],
    usage: &'static str,
) -> Result<(DeviceId, &'a str), ParseError> {
    let [id, value] = args else {
        return Err(ParseError::Usage(usage));
    };
    let id = DeviceId::new(*id).map_err(|_| ParseError::Usage(usage))?;
    Ok((id, *value))
}

impl FromStr for DashboardCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match name.to_ascii_lowercase().as_str() {
            "light" => {
                let (id, value) = id_and_value(&args, LIGHT_USAGE)?;
                let power = switch(value, "on", "off").ok_or(ParseError::Usage(LIGHT_USAGE))?;
                Ok(Self::Light { id, power })
            }
            "brightness" => {
                let (id, value) = id_and_value(&args, BRIGHTNESS_USAGE)?;
                Ok(Self::Brightness {
                    id,
                    value: value.to_string(),
                })
            }
            "lock" => {
                let (id, value) = id_and_value(&args, LOCK_USAGE)?;
                let locked = switch(value, "lock", "unlock").ok_or(ParseError::Usage(LOCK_USAGE))?;
                Ok(Self::Lock { id, locked })
            }
            "temp" => {
                let (id, value) = id_and_value(&args, TEMP_USAGE)?;
                let target = value
                    .parse::<f64>()
                    .ok()
                    .filter(|t| t.is_finite())
                    .ok_or_else(|| ParseError::InvalidNumber(value.to_string()))?;
                Ok(Self::Temperature { id, target })
            }
            "camera" => {
                let (id, value) = id_and_value(&args, CAMERA_USAGE)?;
                let recording =
                    switch(value, "on", "off").ok_or(ParseError::Usage(CAMERA_USAGE))?;
                Ok(Self::Camera { id, recording })
            }
            "refresh" => Ok(Self::Refresh),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(ParseError::Unknown(name.to_string())),
        }
    }
}
