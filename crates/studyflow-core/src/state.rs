//! Per-user persisted state: courses, tasks, profile, history, session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::task::{Course, Task};

/// One reflection record. Append-only; one entry per reflection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub completed_task_ids: Vec<String>,
    pub partial_task_ids: Vec<String>,
    /// Subjective difficulty, 1 (easy) to 5 (hard).
    pub difficulty_rating: u32,
    pub notes: String,
}

/// Lightweight session tracking across requests.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionInfo {
    pub current_session_id: Option<String>,
    pub last_interaction_at: Option<DateTime<Utc>>,
    pub interaction_count: u32,
}

/// Full state for one user, stored as a unit behind the [`StateStore`]
/// read-modify-write boundary.
///
/// [`StateStore`]: crate::storage::StateStore
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserState {
    pub courses: Vec<Course>,
    pub tasks: Vec<Task>,
    pub profile: Profile,
    pub history: Vec<HistoryEntry>,
    pub session: SessionInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_first_access_contract() {
        let state = UserState::default();
        assert!(state.courses.is_empty());
        assert!(state.tasks.is_empty());
        assert_eq!(state.profile.preferred_block_minutes, 45);
        assert_eq!(state.profile.max_blocks_per_day, 3);
        assert!(state.history.is_empty());
        assert!(state.session.current_session_id.is_none());
        assert_eq!(state.session.interaction_count, 0);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = UserState::default();
        state.history.push(HistoryEntry {
            date: NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
            completed_task_ids: vec!["t1".to_string()],
            partial_task_ids: vec![],
            difficulty_rating: 3,
            notes: "CNN math was harder than expected.".to_string(),
        });

        let json = serde_json::to_string(&state).unwrap();
        let decoded: UserState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.history.len(), 1);
        assert_eq!(decoded.history[0].difficulty_rating, 3);
    }
}
