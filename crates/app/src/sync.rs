//! Device state synchronizer: keeps a client-side device set consistent
//! with a remote [`DeviceSource`](crate::ports::DeviceSource).
//!
//! The remote store is authoritative. Local state is only ever replaced by a
//! successful fetch; user commands are written remotely first and become
//! visible through the refresh that follows.

mod snapshot;
mod store;
mod synchronizer;

pub use snapshot::{DashboardSnapshot, DeviceCard, Section};
pub use store::{DeviceStore, FetchTicket, RefreshOutcome};
pub use synchronizer::{CommandOutcome, DEFAULT_POLL_INTERVAL, PollHandle, Synchronizer};
