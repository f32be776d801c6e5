//! [`DeviceView`] that prints snapshots as plain text.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use homedeck_app::ports::DeviceView;
use homedeck_app::sync::{DashboardSnapshot, DeviceCard};
use homedeck_domain::device::{DeviceStatus, DeviceType};
use homedeck_domain::sync::{ConnectionStatus, SyncMarker};

fn section_title(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Light => "Lights",
        DeviceType::Lock => "Locks",
        DeviceType::Thermostat => "Thermostats",
        DeviceType::MotionSensor => "Motion sensors",
        DeviceType::Camera => "Cameras",
    }
}

fn badge(connection: ConnectionStatus) -> &'static str {
    match connection {
        ConnectionStatus::Connecting => "connecting",
        ConnectionStatus::Online => "connected",
        ConnectionStatus::Offline => "offline, showing last known devices",
        ConnectionStatus::Demo => "demo mode, server unreachable",
    }
}

fn describe(status: &DeviceStatus) -> String {
    match status {
        DeviceStatus::Light(s) => {
            format!("{}, brightness {}%", if s.power { "on" } else { "off" }, s.brightness)
        }
        DeviceStatus::Lock(s) => (if s.locked { "locked" } else { "unlocked" }).to_string(),
        DeviceStatus::Thermostat(s) => format!("{}°C, target {}°C", s.temperature, s.target),
        DeviceStatus::MotionSensor(s) => {
            (if s.motion_detected { "motion detected" } else { "no motion" }).to_string()
        }
        DeviceStatus::Camera(s) => {
            (if s.recording { "recording" } else { "stopped" }).to_string()
        }
    }
}

fn write_card<W: Write>(out: &mut W, card: &DeviceCard) -> io::Result<()> {
    let device = &card.device;
    let indicator = if device.status.is_online() { '●' } else { '○' };
    let location = if device.location.is_empty() {
        "-"
    } else {
        device.location.as_str()
    };
    write!(
        out,
        "  {indicator} [{}] {} ({location}): {}",
        device.id,
        device.name,
        describe(&device.status)
    )?;
    if card.marker != SyncMarker::Synced {
        write!(out, " [{}]", card.marker)?;
    }
    writeln!(out)
}

/// Write one full dashboard frame.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_snapshot<W: Write>(out: &mut W, snapshot: &DashboardSnapshot) -> io::Result<()> {
    writeln!(
        out,
        "== homedeck: {} ({} devices) ==",
        badge(snapshot.connection),
        snapshot.device_count()
    )?;
    for section in &snapshot.sections {
        writeln!(out, "{}", section_title(section.device_type))?;
        if section.is_empty() {
            writeln!(out, "  no devices of this type")?;
        }
        for card in &section.devices {
            write_card(out, card)?;
        }
    }
    Ok(())
}

/// Prints every snapshot to a writer, usually stdout.
pub struct TerminalView<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Give the writer back.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl TerminalView<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> DeviceView for TerminalView<W> {
    fn render(&self, snapshot: &DashboardSnapshot) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = write_snapshot(&mut *out, snapshot).and_then(|()| out.flush()) {
            tracing::warn!(error = %err, "failed to render dashboard");
        }
    }
}
