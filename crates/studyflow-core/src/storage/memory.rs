//! In-process state store.
//!
//! The default store for a single-process deployment and for tests. The
//! mutex serializes concurrent access per process, which is all the
//! single-writer-per-user model asks for.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, StorageError};
use crate::state::UserState;
use crate::storage::StateStore;

/// `Mutex<HashMap>`-backed store keyed by user id.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, UserState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get_user_state(&self, user_id: &str) -> Result<UserState> {
        let mut users = self
            .users
            .lock()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        Ok(users.entry(user_id.to_string()).or_default().clone())
    }

    fn save_user_state(&self, user_id: &str, state: &UserState) -> Result<()> {
        let mut users = self
            .users
            .lock()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        users.insert(user_id.to_string(), state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    #[test]
    fn first_access_creates_default_state() {
        let store = MemoryStore::new();
        let state = store.get_user_state("u1").unwrap();
        assert_eq!(state.profile, Profile::default());
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn save_then_get_round_trips() {
        let store = MemoryStore::new();
        let mut state = store.get_user_state("u1").unwrap();
        state.profile.max_blocks_per_day = 5;
        store.save_user_state("u1", &state).unwrap();

        let reread = store.get_user_state("u1").unwrap();
        assert_eq!(reread.profile.max_blocks_per_day, 5);
    }

    #[test]
    fn users_are_isolated() {
        let store = MemoryStore::new();
        let mut state = store.get_user_state("u1").unwrap();
        state.profile.max_blocks_per_day = 1;
        store.save_user_state("u1", &state).unwrap();

        let other = store.get_user_state("u2").unwrap();
        assert_eq!(other.profile.max_blocks_per_day, 3);
    }
}
