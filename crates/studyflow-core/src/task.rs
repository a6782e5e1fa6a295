//! Courses, tasks, and the task status machine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A course the student is enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    pub name: String,
}

/// Lifecycle status of a task.
///
/// `pending -> in_progress -> done`, although reflection updates are not
/// strictly monotonic: an ID reported as completed jumps straight to `Done`
/// regardless of prior status. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

/// A study task tied to a course, with a hard deadline date.
///
/// `task_id` is unique within one user's task list. Tasks are created at
/// setup and never deleted; only `status` mutates afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub course_id: String,
    pub title: String,
    pub deadline_date: NaiveDate,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Whether this task is still eligible for planning.
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Done
    }
}

/// Apply a reflection outcome to a task list in place.
///
/// The completed list is checked before the partial list, so a task ID
/// present in both resolves to `Done`. IDs in neither list are untouched;
/// unknown IDs are ignored.
pub fn apply_reflection_outcome(tasks: &mut [Task], completed: &[String], partial: &[String]) {
    for task in tasks.iter_mut() {
        if completed.iter().any(|id| id == &task.task_id) {
            task.status = TaskStatus::Done;
        } else if partial.iter().any(|id| id == &task.task_id) {
            task.status = TaskStatus::InProgress;
        }
    }
}
