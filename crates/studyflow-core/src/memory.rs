//! Long-term state management for a user.
//!
//! Wraps a [`StateStore`] with the operations the planning and reflection
//! flows need: setup, profile summaries, planning views, status reports, and
//! session tracking. Every mutating method is one read-modify-write round
//! trip against the store.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::{Profile, ProfileOverrides};
use crate::state::{HistoryEntry, SessionInfo};
use crate::storage::StateStore;
use crate::task::{apply_reflection_outcome, Course, Task, TaskStatus};

/// Compact view of a user's state, returned by setup and used as narration
/// context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile: Profile,
    pub courses: Vec<Course>,
    pub tasks: Vec<Task>,
    pub summary_text: String,
}

/// Progress overview across all of a user's tasks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusReport {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: f64,
    #[serde(default)]
    pub profile: Option<Profile>,
    pub history_count: usize,
}

/// State operations over an injected store.
pub struct MemoryService<'a> {
    store: &'a dyn StateStore,
}

impl<'a> MemoryService<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// Initialize or update a user's courses, tasks and profile.
    ///
    /// Courses and tasks replace the stored lists wholesale; profile
    /// overrides apply on top of the stored profile.
    pub fn setup_user(
        &self,
        user_id: &str,
        courses: Vec<Course>,
        tasks: Vec<Task>,
        overrides: &ProfileOverrides,
    ) -> Result<ProfileSummary> {
        let mut state = self.store.get_user_state(user_id)?;
        state.courses = courses;
        state.tasks = tasks;
        state.profile.apply_overrides(overrides);
        self.store.save_user_state(user_id, &state)?;
        log::info!(
            "setup user '{}': {} courses, {} tasks",
            user_id,
            state.courses.len(),
            state.tasks.len()
        );
        self.profile_summary(user_id)
    }

    /// Compact summary of the user's state for narration context.
    pub fn profile_summary(&self, user_id: &str) -> Result<ProfileSummary> {
        let state = self.store.get_user_state(user_id)?;
        let summary_text = format!(
            "User is enrolled in {} courses and has {} tasks. \
             Typical study pattern: up to {} blocks of {} minutes per day.",
            state.courses.len(),
            state.tasks.len(),
            state.profile.max_blocks_per_day,
            state.profile.preferred_block_minutes
        );

        Ok(ProfileSummary {
            profile: state.profile,
            courses: state.courses,
            tasks: state.tasks,
            summary_text,
        })
    }

    /// Tasks still eligible for planning (everything not done).
    pub fn tasks_for_planning(&self, user_id: &str) -> Result<Vec<Task>> {
        let state = self.store.get_user_state(user_id)?;
        Ok(state.tasks.into_iter().filter(Task::is_open).collect())
    }

    /// Apply a reflection outcome to task statuses and append the history
    /// entry, in a single read-modify-write.
    pub fn update_tasks_and_history(
        &self,
        user_id: &str,
        completed_task_ids: Vec<String>,
        partial_task_ids: Vec<String>,
        difficulty_rating: u32,
        notes: String,
        date: NaiveDate,
    ) -> Result<HistoryEntry> {
        let mut state = self.store.get_user_state(user_id)?;
        apply_reflection_outcome(&mut state.tasks, &completed_task_ids, &partial_task_ids);

        let entry = HistoryEntry {
            date,
            completed_task_ids,
            partial_task_ids,
            difficulty_rating,
            notes,
        };
        state.history.push(entry.clone());
        self.store.save_user_state(user_id, &state)?;
        Ok(entry)
    }

    /// Progress overview for feedback generation.
    pub fn status(&self, user_id: &str) -> Result<StatusReport> {
        let state = self.store.get_user_state(user_id)?;
        let total = state.tasks.len();
        let done = state
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();

        Ok(StatusReport {
            total_tasks: total,
            completed_tasks: done,
            completion_rate: if total > 0 {
                done as f64 / total as f64
            } else {
                0.0
            },
            profile: Some(state.profile),
            history_count: state.history.len(),
        })
    }

    /// Continue the given session or start a fresh one, bumping the
    /// interaction counter either way.
    pub fn start_or_continue_session(
        &self,
        user_id: &str,
        session_id: Option<String>,
    ) -> Result<SessionInfo> {
        let mut state = self.store.get_user_state(user_id)?;
        let session_id =
            session_id.unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

        state.session.current_session_id = Some(session_id);
        state.session.last_interaction_at = Some(Utc::now());
        state.session.interaction_count += 1;

        self.store.save_user_state(user_id, &state)?;
        Ok(state.session)
    }
}
