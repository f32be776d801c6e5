//! # homedeck-adapter-http-reqwest
//!
//! Remote [`DeviceSource`](homedeck_app::ports::DeviceSource) built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Fetch the device set from `GET /api/devices`
//! - Write statuses with `PUT /api/devices/{id}`
//! - Append activity with `POST /api/activity-logs`
//! - Turn transport failures and non-success responses into errors the
//!   synchronizer can recover from
//!
//! Both list envelopes are understood: `{ "devices": [..] }` and
//! `{ "success": true, "data": [..] }`.
//!
//! ## Dependency rule
//! Depends on `homedeck-app` (for the port trait) and `homedeck-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

mod config;
mod error;
mod source;

pub use config::{Config, DEFAULT_TIMEOUT};
pub use error::RemoteError;
pub use source::HttpDeviceSource;
