//! # homedeck-domain
//!
//! Pure domain model for the homedeck smart-home dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** as a tagged union over the supported device kinds
//!   (lights, locks, thermostats, motion sensors, cameras)
//! - Define **Commands** (user intents such as toggling a light) and their
//!   domain clamps
//! - Define **Activity logs** (records of commands applied to devices)
//! - Define the **sync markers** the dashboard shows while reconciling with
//!   the remote store
//! - Provide the fixed **demo device set** used when no backend is reachable
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod activity;
pub mod command;
pub mod demo;
pub mod device;
pub mod sync;
