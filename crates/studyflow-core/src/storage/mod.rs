pub mod config;
pub mod database;
pub mod memory;

pub use config::Config;
pub use database::UserDb;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{Result, StorageError};
use crate::state::UserState;

/// Key-value collaborator holding full per-user state.
///
/// Callers own the read-modify-write boundary: read the full state, compute,
/// write the full state back. Writes are idempotent full overwrites with
/// last-writer-wins semantics; serialization per user is the
/// implementation's concern (the in-memory store uses a mutex, SQLite
/// serializes at the connection).
pub trait StateStore: Send + Sync {
    /// Full state for a user, creating the default state on first access.
    fn get_user_state(&self, user_id: &str) -> Result<UserState>;

    /// Persist the full state for a user.
    fn save_user_state(&self, user_id: &str, state: &UserState) -> Result<()>;
}

/// Returns `~/.config/studyflow[-dev]/` based on STUDYFLOW_ENV.
///
/// Set STUDYFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyflow-dev")
    } else {
        base_dir.join("studyflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
