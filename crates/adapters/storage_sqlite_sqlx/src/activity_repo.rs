//! `SQLite` implementation of [`ActivityLogRepository`].

use std::str::FromStr;

use chrono::SecondsFormat;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use homedeck_app::ports::ActivityLogRepository;
use homedeck_domain::activity::ActivityLog;
use homedeck_domain::error::HomeDeckError;
use homedeck_domain::id::{ActivityLogId, DeviceId};

use crate::error::StorageError;

struct Wrapper(ActivityLog);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let device_id: String = row.try_get("device_id")?;
        let action: String = row.try_get("action")?;
        let details: Option<String> = row.try_get("details")?;
        let created_at: String = row.try_get("created_at")?;

        let device_id =
            DeviceId::from_str(&device_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(ActivityLog {
            id: ActivityLogId::from_uuid(id),
            device_id,
            action,
            details,
            created_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO activity_logs (id, device_id, action, details, created_at)
    VALUES (?, ?, ?, ?, ?)
";

// Timestamps are fixed-width UTC strings, so text order is time order.
const SELECT_RECENT: &str =
    "SELECT * FROM activity_logs ORDER BY created_at DESC, rowid DESC LIMIT ?";

/// `SQLite`-backed activity log.
pub struct SqliteActivityLogRepository {
    pool: SqlitePool,
}

impl SqliteActivityLogRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActivityLogRepository for SqliteActivityLogRepository {
    async fn append(&self, log: ActivityLog) -> Result<ActivityLog, HomeDeckError> {
        sqlx::query(INSERT)
            .bind(log.id.as_uuid())
            .bind(log.device_id.as_str())
            .bind(&log.action)
            .bind(&log.details)
            .bind(log.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(log)
    }

    async fn get_recent(&self, limit: usize) -> Result<Vec<ActivityLog>, HomeDeckError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
