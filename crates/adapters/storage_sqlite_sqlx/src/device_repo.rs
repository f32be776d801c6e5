//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homedeck_app::ports::DeviceRepository;
use homedeck_domain::device::{Device, DeviceStatus, DeviceType};
use homedeck_domain::error::{HomeDeckError, NotFoundError};
use homedeck_domain::id::DeviceId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

fn decode<E: std::error::Error + Send + Sync + 'static>(err: E) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let device_type: String = row.try_get("device_type")?;
        let location: String = row.try_get("location")?;
        let status_json: String = row.try_get("status")?;

        let id = DeviceId::from_str(&id).map_err(decode)?;
        let device_type = DeviceType::from_str(&device_type).map_err(decode)?;
        let status: serde_json::Value = serde_json::from_str(&status_json).map_err(decode)?;
        let status = DeviceStatus::from_remote(device_type, &status);

        Ok(Self(Device {
            id,
            name,
            location,
            status,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, device_type, location, status) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY seq";
const UPDATE: &str =
    "UPDATE devices SET name = ?, device_type = ?, location = ?, status = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

fn not_found(id: &DeviceId) -> HomeDeckError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HomeDeckError>> + Send {
        let pool = self.pool.clone();
        async move {
            let status = serde_json::to_string(&device.status.to_map()).map_err(StorageError::from)?;
            sqlx::query(INSERT)
                .bind(device.id.as_str())
                .bind(&device.name)
                .bind(device.device_type().as_str())
                .bind(&device.location)
                .bind(status)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HomeDeckError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HomeDeckError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, HomeDeckError>> + Send {
        let pool = self.pool.clone();
        async move {
            let status = serde_json::to_string(&device.status.to_map()).map_err(StorageError::from)?;
            let result = sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(device.device_type().as_str())
                .bind(&device.location)
                .bind(status)
                .bind(device.id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(&device.id));
            }
            Ok(device)
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HomeDeckError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(&id));
            }
            Ok(())
        }
    }
}
