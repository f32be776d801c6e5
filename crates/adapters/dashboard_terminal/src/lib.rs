//! # homedeck-adapter-dashboard-terminal
//!
//! Line-oriented terminal front end for the synchronizer.
//!
//! ## Responsibilities
//! - Implement the [`DeviceView`](homedeck_app::ports::DeviceView) port by
//!   printing every [`DashboardSnapshot`](homedeck_app::sync::DashboardSnapshot)
//! - Parse the commands typed by the user into [`DashboardCommand`]
//!
//! Reading stdin and dispatching commands onto the synchronizer is left to
//! the binary.
//!
//! ## Dependency rule
//! Depends on `homedeck-app` (for the view port and snapshots) and
//! `homedeck-domain`. Neither may reference this adapter.

mod command;
mod view;

pub use command::{DashboardCommand, HELP, ParseError};
pub use view::{TerminalView, write_snapshot};
