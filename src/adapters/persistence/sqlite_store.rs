//! SQLite-backed reminder store via libsql. Append-only history with
//! oldest-first enumeration.
//!
//! One `reminders` table in reminders.db under the data directory; WAL
//! journal mode with synchronous=NORMAL.

use crate::domain::{Coordinate, DomainError, ReminderEvent};
use crate::ports::ReminderStorePort;
use libsql::{params, Database};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

const REMINDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY,
    region_name TEXT NOT NULL,
    note TEXT NOT NULL,
    lat REAL NOT NULL,
    lon REAL NOT NULL,
    radius_meters REAL NOT NULL,
    recorded_at INTEGER NOT NULL
)"#;
const REMINDERS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reminders_recorded_at ON reminders (recorded_at)";

/// SQLite reminder store. One database file (reminders.db) in the given
/// base directory.
pub struct SqliteReminderStore {
    db: Database,
}

impl SqliteReminderStore {
    /// Open (or create) the database and ensure the schema exists. Call
    /// once at startup; the returned store is safe to share via Arc.
    ///
    /// WAL mode enables concurrent readers plus one writer, and
    /// synchronous=NORMAL is safe with WAL while faster than FULL.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Store(e.to_string()))?;
        let db_path = base.join("reminders.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;

        // PRAGMA returns a row (the new value); use query and consume rows
        // (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Store(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
            .is_some()
        {}
        let mut sync_rows = conn
            .query("PRAGMA synchronous=NORMAL", ())
            .await
            .map_err(|e| DomainError::Store(format!("synchronous pragma failed: {}", e)))?;
        while sync_rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
            .is_some()
        {}

        conn.execute(REMINDERS_TABLE, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(REMINDERS_INDEX, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        info!(path = %db_path.display(), "reminder store connected");
        Ok(Self { db })
    }
}

#[async_trait::async_trait]
impl ReminderStorePort for SqliteReminderStore {
    async fn append(&self, event: &ReminderEvent) -> Result<(), DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(
            r#"
            INSERT INTO reminders (id, region_name, note, lat, lon, radius_meters, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (id) DO NOTHING
            "#,
            params![
                event.id.to_string(),
                event.region_name.as_str(),
                event.note.as_str(),
                event.center.lat,
                event.center.lon,
                event.radius_meters,
                event.recorded_at
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ReminderEvent>, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, region_name, note, lat, lon, radius_meters, recorded_at
                FROM reminders
                ORDER BY recorded_at ASC, id ASC
                "#,
                (),
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        let mut events = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let id_raw: String = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            let id = Uuid::parse_str(&id_raw)
                .map_err(|e| DomainError::Store(format!("bad reminder id {}: {}", id_raw, e)))?;
            let region_name: String = row.get(1).map_err(|e| DomainError::Store(e.to_string()))?;
            let note: String = row.get(2).map_err(|e| DomainError::Store(e.to_string()))?;
            let lat: f64 = row.get(3).map_err(|e| DomainError::Store(e.to_string()))?;
            let lon: f64 = row.get(4).map_err(|e| DomainError::Store(e.to_string()))?;
            let radius_meters: f64 = row.get(5).map_err(|e| DomainError::Store(e.to_string()))?;
            let recorded_at: i64 = row.get(6).map_err(|e| DomainError::Store(e.to_string()))?;
            events.push(ReminderEvent {
                id,
                region_name,
                note,
                center: Coordinate::new(lat, lon),
                radius_meters,
                recorded_at,
            });
        }
        Ok(events)
    }
}
