//! SQLite-based state store.
//!
//! Persists one JSON state blob per user. The blob-per-user shape matches
//! the store contract exactly: full-state reads, idempotent full-state
//! overwrites, last-writer-wins.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StorageError};
use crate::state::UserState;
use crate::storage::{data_dir, StateStore};

/// SQLite database holding per-user state blobs.
pub struct UserDb {
    conn: Mutex<Connection>,
}

impl UserDb {
    /// Open the database at `~/.config/studyflow/studyflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("studyflow.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path (used by tests).
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS user_state (
                user_id TEXT PRIMARY KEY,
                state TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(StorageError::from)?;
        Ok(())
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::QueryFailed(e.to_string()).into())
    }
}

impl StateStore for UserDb {
    fn get_user_state(&self, user_id: &str) -> Result<UserState> {
        let conn = self.lock_conn()?;
        let blob: Option<String> = conn
            .query_row(
                "SELECT state FROM user_state WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::from)?;

        match blob {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| {
                    StorageError::CorruptState {
                        user_id: user_id.to_string(),
                        message: e.to_string(),
                    }
                    .into()
                })
            }
            None => Ok(UserState::default()),
        }
    }

    fn save_user_state(&self, user_id: &str, state: &UserState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO user_state (user_id, state, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                 state = excluded.state,
                 updated_at = excluded.updated_at",
            params![user_id, json, Utc::now().to_rfc3339()],
        )
        .map_err(StorageError::from)?;
        Ok(())
    }
}
