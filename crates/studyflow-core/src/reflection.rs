//! Reflection flow: task updates, history, capacity adaptation, feedback.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::memory::MemoryService;
use crate::narrative::{narrate_reflection, NarrativeText, Narrator};
use crate::profile::{adapt_max_blocks, Profile};
use crate::state::{HistoryEntry, SessionInfo};
use crate::storage::StateStore;

/// Result of one reflection call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectResponse {
    pub history_entry: HistoryEntry,
    pub updated_profile: Profile,
    pub session: SessionInfo,
    pub feedback: NarrativeText,
}

/// Processes post-session reflections.
pub struct ReflectionService<'a> {
    store: &'a dyn StateStore,
    narrator: &'a dyn Narrator,
}

impl<'a> ReflectionService<'a> {
    pub fn new(store: &'a dyn StateStore, narrator: &'a dyn Narrator) -> Self {
        Self { store, narrator }
    }

    /// Record a reflection and adapt future planning.
    ///
    /// Updates task statuses (completed wins over partial on overlap),
    /// appends the history entry, applies the capacity adaptation rule to
    /// the stored profile, updates the session, and narrates feedback last.
    /// The date defaults to today when not supplied.
    pub fn reflect(
        &self,
        user_id: &str,
        completed_task_ids: Vec<String>,
        partial_task_ids: Vec<String>,
        difficulty_rating: u32,
        notes: String,
        date: Option<NaiveDate>,
    ) -> Result<ReflectResponse> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let memory = MemoryService::new(self.store);

        let entry = memory.update_tasks_and_history(
            user_id,
            completed_task_ids,
            partial_task_ids,
            difficulty_rating,
            notes,
            date,
        )?;

        let mut state = self.store.get_user_state(user_id)?;
        let previous = state.profile.max_blocks_per_day;
        state.profile.max_blocks_per_day = adapt_max_blocks(
            previous,
            difficulty_rating,
            entry.partial_task_ids.len(),
            entry.completed_task_ids.len(),
        );
        if state.profile.max_blocks_per_day != previous {
            log::info!(
                "adapted max_blocks_per_day for user '{}': {} -> {}",
                user_id,
                previous,
                state.profile.max_blocks_per_day
            );
        }
        let updated_profile = state.profile.clone();
        self.store.save_user_state(user_id, &state)?;

        let session = memory.start_or_continue_session(user_id, None)?;
        let status = memory.status(user_id)?;
        let feedback = narrate_reflection(self.narrator, &entry, &status);

        Ok(ReflectResponse {
            history_entry: entry,
            updated_profile,
            session,
            feedback,
        })
    }
}
