//! # homedeck-app
//!
//! Application layer: use-cases, **port definitions** (traits) and the
//! device state synchronizer.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository`: CRUD for devices (server side)
//!   - `ActivityLogRepository`: append & query activity (server side)
//!   - `DeviceSource`: the remote store as seen by the dashboard
//!   - `DeviceView`: where dashboard snapshots are rendered
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService`: create, get, list, replace status, patch, delete, seed
//!   - `ActivityService`: record, list recent
//!   - `Synchronizer`: refresh, poll, apply user commands
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `homedeck-domain` only (plus `tokio` for the polling task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod sync;
