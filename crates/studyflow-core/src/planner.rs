//! Planning flow: state in, study blocks out, narration last.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::memory::MemoryService;
use crate::narrative::{narrate_plan, NarrativeText, Narrator};
use crate::scheduler::{schedule_day, StudyBlock, TimeWindow, WindowSpec};
use crate::state::SessionInfo;
use crate::storage::StateStore;

/// Result of planning one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub profile_summary: String,
    pub planned_blocks: Vec<StudyBlock>,
    pub plan_summary: NarrativeText,
    pub session: SessionInfo,
}

/// Turns tasks and preferences into a concrete day plan.
pub struct Planner<'a> {
    store: &'a dyn StateStore,
    narrator: &'a dyn Narrator,
}

impl<'a> Planner<'a> {
    pub fn new(store: &'a dyn StateStore, narrator: &'a dyn Narrator) -> Self {
        Self { store, narrator }
    }

    /// Plan study blocks for one day.
    ///
    /// Reads the profile and pending tasks, runs the scheduler with the
    /// profile's block length and capacity, updates the session, and only
    /// then narrates. The schedule is complete before narration starts, so a
    /// narration failure can never lose the plan.
    pub fn plan_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        windows: &[WindowSpec],
        session_id: Option<String>,
    ) -> Result<PlanResponse> {
        let memory = MemoryService::new(self.store);
        let summary = memory.profile_summary(user_id)?;
        let tasks = memory.tasks_for_planning(user_id)?;

        let parsed_windows = windows
            .iter()
            .map(TimeWindow::from_spec)
            .collect::<Result<Vec<_>, _>>()?;

        let blocks = schedule_day(
            &tasks,
            date,
            &parsed_windows,
            summary.profile.preferred_block_minutes,
            summary.profile.max_blocks_per_day,
        )?;
        log::debug!(
            "planned {} blocks for user '{}' on {}",
            blocks.len(),
            user_id,
            date
        );

        let session = memory.start_or_continue_session(user_id, session_id)?;
        let plan_summary = narrate_plan(self.narrator, &summary.summary_text, &blocks);

        Ok(PlanResponse {
            profile_summary: summary.summary_text,
            planned_blocks: blocks,
            plan_summary,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryService;
    use crate::narrative::OfflineNarrator;
    use crate::profile::ProfileOverrides;
    use crate::storage::MemoryStore;
    use crate::task::{Task, TaskStatus};

    fn make_task(id: &str, deadline: &str) -> Task {
        Task {
            task_id: id.to_string(),
            course_id: "cs101".to_string(),
            title: format!("Task {}", id),
            deadline_date: NaiveDate::parse_from_str(deadline, "%Y-%m-%d").unwrap(),
            status: TaskStatus::Pending,
        }
    }

    fn window(start: &str, end: &str) -> WindowSpec {
        WindowSpec {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup_user(store: &MemoryStore, tasks: Vec<Task>, overrides: &ProfileOverrides) {
        MemoryService::new(store)
            .setup_user("u1", vec![], tasks, overrides)
            .unwrap();
    }

    #[test]
    fn plan_uses_profile_parameters() {
        let store = MemoryStore::new();
        setup_user(
            &store,
            vec![make_task("A", "2025-12-05"), make_task("B", "2025-11-30")],
            &ProfileOverrides {
                preferred_block_minutes: Some(45),
                max_blocks_per_day: Some(2),
            },
        );

        let planner = Planner::new(&store, &OfflineNarrator);
        let response = planner
            .plan_day("u1", date("2025-12-01"), &[window("19:00", "21:00")], None)
            .unwrap();

        assert_eq!(response.planned_blocks.len(), 2);
        assert_eq!(response.planned_blocks[0].task_id, "B");
        assert_eq!(response.planned_blocks[1].task_id, "A");
        assert_eq!(response.session.interaction_count, 1);
    }

    #[test]
    fn plan_skips_done_tasks() {
        let store = MemoryStore::new();
        let mut done = make_task("done", "2025-11-29");
        done.status = TaskStatus::Done;
        setup_user(
            &store,
            vec![done, make_task("open", "2025-12-05")],
            &ProfileOverrides::default(),
        );

        let planner = Planner::new(&store, &OfflineNarrator);
        let response = planner
            .plan_day("u1", date("2025-12-01"), &[window("19:00", "21:00")], None)
            .unwrap();

        assert_eq!(response.planned_blocks.len(), 1);
        assert_eq!(response.planned_blocks[0].task_id, "open");
    }

    #[test]
    fn narration_failure_still_returns_the_plan() {
        let store = MemoryStore::new();
        setup_user(
            &store,
            vec![make_task("A", "2025-12-05")],
            &ProfileOverrides::default(),
        );

        let planner = Planner::new(&store, &OfflineNarrator);
        let response = planner
            .plan_day("u1", date("2025-12-01"), &[window("19:00", "21:00")], None)
            .unwrap();

        assert_eq!(response.planned_blocks.len(), 1);
        assert!(response.plan_summary.is_fallback());
        assert!(response.plan_summary.text().contains("Task A"));
    }

    #[test]
    fn malformed_window_rejects_the_request() {
        let store = MemoryStore::new();
        setup_user(
            &store,
            vec![make_task("A", "2025-12-05")],
            &ProfileOverrides::default(),
        );

        let planner = Planner::new(&store, &OfflineNarrator);
        let err = planner
            .plan_day("u1", date("2025-12-01"), &[window("7pm", "21:00")], None)
            .unwrap_err();
        assert!(matches!(err, crate::error::CoreError::Parse(_)));
    }

    #[test]
    fn plan_for_unknown_user_is_empty_not_an_error() {
        let store = MemoryStore::new();
        let planner = Planner::new(&store, &OfflineNarrator);
        let response = planner
            .plan_day("ghost", date("2025-12-01"), &[window("19:00", "21:00")], None)
            .unwrap();
        assert!(response.planned_blocks.is_empty());
    }

    #[test]
    fn explicit_session_id_is_continued() {
        let store = MemoryStore::new();
        setup_user(&store, vec![], &ProfileOverrides::default());

        let planner = Planner::new(&store, &OfflineNarrator);
        let response = planner
            .plan_day(
                "u1",
                date("2025-12-01"),
                &[],
                Some("session-abc".to_string()),
            )
            .unwrap();
        assert_eq!(
            response.session.current_session_id.as_deref(),
            Some("session-abc")
        );
    }
}
