use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{Result, TidingsError};
use crate::domain::ConsentState;
use crate::store::{Store, CONSENT_OPTION, LAST_CHECK_OPTION, OPTION_GROUP};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| TidingsError::Migration(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            TidingsError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    pub fn get_option(&self, group_id: &str, option_id: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM options WHERE group_id = ?1 AND option_id = ?2",
                params![group_id, option_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_option(&self, group_id: &str, option_id: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO options (group_id, option_id, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(group_id, option_id) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![group_id, option_id, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }
}

impl Store for SqliteStore {
    fn consent(&self) -> Result<ConsentState> {
        match self.get_option(OPTION_GROUP, CONSENT_OPTION)? {
            Some(value) => value.parse(),
            None => Ok(ConsentState::default()),
        }
    }

    fn set_consent(&self, state: ConsentState) -> Result<()> {
        self.set_option(OPTION_GROUP, CONSENT_OPTION, state.as_str())
    }

    fn last_check(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(value) = self.get_option(OPTION_GROUP, LAST_CHECK_OPTION)? else {
            return Ok(None);
        };
        Self::parse_datetime(&value)
            .map(Some)
            .ok_or_else(|| TidingsError::InvalidOption {
                option: LAST_CHECK_OPTION.into(),
                value,
            })
    }

    fn set_last_check(&self, at: DateTime<Utc>) -> Result<()> {
        self.set_option(OPTION_GROUP, LAST_CHECK_OPTION, &at.to_rfc3339())
    }
}
