//! Narrative text generation with deterministic fallbacks.
//!
//! The narrator is a collaborator that may fail or time out. Planning and
//! reflection always complete their primary work first, then ask for text;
//! when generation fails, a fallback string is synthesized locally from the
//! same inputs and the failure category is embedded for diagnostics. The
//! fallback path is an explicit branch carried in [`NarrativeText`], not a
//! silent catch-all.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiNarrator;

use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;
use crate::memory::StatusReport;
use crate::scheduler::StudyBlock;
use crate::state::HistoryEntry;

/// Produces human-readable summaries and feedback.
pub trait Narrator: Send + Sync {
    /// Narrate a day plan from the profile summary and scheduled blocks.
    fn plan_summary(
        &self,
        profile_summary: &str,
        blocks: &[StudyBlock],
    ) -> Result<String, NarrativeError>;

    /// Narrate feedback for a reflection from the history entry and status.
    fn reflection_feedback(
        &self,
        entry: &HistoryEntry,
        status: &StatusReport,
    ) -> Result<String, NarrativeError>;
}

/// Narrator that never generates; every call takes the fallback branch.
///
/// Used by offline runs and tests where deterministic output matters.
pub struct OfflineNarrator;

impl Narrator for OfflineNarrator {
    fn plan_summary(&self, _: &str, _: &[StudyBlock]) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }

    fn reflection_feedback(
        &self,
        _: &HistoryEntry,
        _: &StatusReport,
    ) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

/// Narrative text with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum NarrativeText {
    /// Text produced by the generation endpoint.
    Generated { text: String },
    /// Locally synthesized text, with the failure category that caused it.
    Fallback { text: String, reason: String },
}

impl NarrativeText {
    pub fn text(&self) -> &str {
        match self {
            NarrativeText::Generated { text } => text,
            NarrativeText::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, NarrativeText::Fallback { .. })
    }
}

/// Narrate a plan, falling back deterministically on any generation error.
pub fn narrate_plan(
    narrator: &dyn Narrator,
    profile_summary: &str,
    blocks: &[StudyBlock],
) -> NarrativeText {
    match narrator.plan_summary(profile_summary, blocks) {
        Ok(text) => NarrativeText::Generated { text },
        Err(err) => {
            log::warn!("plan narration failed ({}), using fallback", err.category());
            NarrativeText::Fallback {
                text: fallback_plan_summary(profile_summary, blocks, &err),
                reason: err.category().to_string(),
            }
        }
    }
}

/// Narrate reflection feedback, falling back deterministically on error.
pub fn narrate_reflection(
    narrator: &dyn Narrator,
    entry: &HistoryEntry,
    status: &StatusReport,
) -> NarrativeText {
    match narrator.reflection_feedback(entry, status) {
        Ok(text) => NarrativeText::Generated { text },
        Err(err) => {
            log::warn!(
                "reflection narration failed ({}), using fallback",
                err.category()
            );
            NarrativeText::Fallback {
                text: fallback_reflection_feedback(entry, &err),
                reason: err.category().to_string(),
            }
        }
    }
}

/// Deterministic plan summary built purely from the input data.
fn fallback_plan_summary(
    profile_summary: &str,
    blocks: &[StudyBlock],
    err: &NarrativeError,
) -> String {
    let block_lines: Vec<String> = blocks
        .iter()
        .map(|b| {
            format!(
                "- {} {}-{} | {} ({})",
                b.date,
                b.start_time.format("%H:%M"),
                b.end_time.format("%H:%M"),
                b.title,
                b.course_id
            )
        })
        .collect();

    format!(
        "Plan summary:\n{}\n\nToday's blocks:\n{}\n\n(narrative generation failed: {})",
        profile_summary,
        block_lines.join("\n"),
        err.category()
    )
}

/// Deterministic reflection feedback built purely from the input data.
fn fallback_reflection_feedback(entry: &HistoryEntry, err: &NarrativeError) -> String {
    format!(
        "Reflection feedback:\n- Completed: {}, Partial: {}\n- Difficulty: {}/5\n\
         Start with the hardest topic next time and keep the sessions consistent.\n\
         (narrative generation failed: {})",
        entry.completed_task_ids.len(),
        entry.partial_task_ids.len(),
        entry.difficulty_rating,
        err.category()
    )
}
