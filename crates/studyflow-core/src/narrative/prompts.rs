//! Prompt templates for the narrative generator.

use indoc::indoc;

use crate::memory::StatusReport;
use crate::scheduler::StudyBlock;
use crate::state::HistoryEntry;

/// Prompt asking for a short, motivating summary of a day plan.
pub fn plan_summary_prompt(profile_summary: &str, blocks: &[StudyBlock]) -> String {
    format!(
        indoc! {"
            You are a helpful university study assistant.
            Generate a short, motivating summary of today's study plan
            based on the student's profile and planned blocks.

            Profile summary:
            {profile_summary}

            Planned blocks (JSON):
            {blocks}

            Respond in 3-5 sentences, simple and encouraging.
        "},
        profile_summary = profile_summary,
        blocks = serde_json::to_string_pretty(blocks).unwrap_or_default(),
    )
}

/// Prompt asking for personalized feedback after a reflection.
pub fn reflection_feedback_prompt(entry: &HistoryEntry, status: &StatusReport) -> String {
    format!(
        indoc! {"
            You are a friendly study coach.
            Based on the reflection and current status, generate personalized feedback.

            Reflection entry (JSON):
            {entry}

            Current status (JSON):
            {status}

            Give clear feedback in 3-5 sentences.
            Encourage the user and give 1-2 concrete tips for improvement.
        "},
        entry = serde_json::to_string_pretty(entry).unwrap_or_default(),
        status = serde_json::to_string_pretty(status).unwrap_or_default(),
    )
}
