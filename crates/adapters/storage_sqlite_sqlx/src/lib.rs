//! # homedeck-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `homedeck-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `homedeck-app` (for port traits) and `homedeck-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod activity_repo;
mod device_repo;
mod error;
mod pool;

pub use activity_repo::SqliteActivityLogRepository;
pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
