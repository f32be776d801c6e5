//! Reconciliation state shown to the user while the dashboard syncs with
//! its remote store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Health of the link to the remote device store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// No fetch has completed yet.
    #[default]
    Connecting,
    /// The last fetch succeeded.
    Online,
    /// The last fetch failed; the last confirmed devices are still shown.
    Offline,
    /// No fetch ever succeeded; the demo devices are shown.
    Demo,
}

impl ConnectionStatus {
    #[must_use]
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => f.write_str("connecting"),
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
            Self::Demo => f.write_str("demo"),
        }
    }
}

/// Per-device reconciliation marker.
///
/// A device that is not in the local set at all is in the implicit
/// "unknown" state and carries no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMarker {
    /// The shown status is the last one confirmed by the store.
    #[default]
    Synced,
    /// A command was sent and is awaiting the store's answer.
    PendingWrite,
    /// The last command was rejected or never reached the store. The shown
    /// status is still the last confirmed one.
    WriteFailed,
}

impl fmt::Display for SyncMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced => f.write_str("synced"),
            Self::PendingWrite => f.write_str("pending"),
            Self::WriteFailed => f.write_str("write failed"),
        }
    }
}
