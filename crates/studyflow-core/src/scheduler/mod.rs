//! Day scheduler for study blocks.
//!
//! This module converts pending tasks and a day's available time windows
//! into an ordered sequence of fixed-length study blocks:
//! - Splits each window into contiguous blocks of the preferred length
//! - Sorts tasks by deadline (earliest first, stable on ties)
//! - Caps the day at the profile's block capacity
//! - Assigns tasks to blocks one-to-one in order
//!
//! Everything here is pure and deterministic; state and narration live
//! elsewhere.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, ParseError, Result};
use crate::task::Task;

/// Flat priority label carried by every scheduled block.
///
/// Known limitation: blocks are labeled `"high"` uniformly even though tasks
/// are deadline-sorted. A positional urgency rank was never wired up.
pub const BLOCK_PRIORITY_LABEL: &str = "high";

/// One span of available time within a single day.
///
/// Windows are ephemeral, supplied per planning request, and assumed not to
/// cross midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Serde-facing window form with `"HH:MM"` strings, as requests carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSpec {
    pub start: String,
    pub end: String,
}

/// Parse a zero-padded 24-hour `"HH:MM"` time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ParseError::InvalidTime {
        value: value.to_string(),
    })
}

/// Parse a `"YYYY-MM-DD"` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ParseError::InvalidDate {
        value: value.to_string(),
    })
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse a [`WindowSpec`] into a concrete window.
    pub fn from_spec(spec: &WindowSpec) -> Result<Self, ParseError> {
        Ok(Self {
            start: parse_time(&spec.start)?,
            end: parse_time(&spec.end)?,
        })
    }
}

/// One scheduled study block. Derived per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyBlock {
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub task_id: String,
    pub course_id: String,
    pub title: String,
    pub priority: String,
}

/// `"HH:MM"` serde codec for block times.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// Split a window into fixed-length contiguous blocks.
///
/// Emits `floor(len / block_minutes)` blocks starting at `window.start`; any
/// remainder shorter than a block is discarded. A block that would wrap past
/// midnight is never emitted. A reversed or zero-length window yields no
/// blocks rather than an error.
pub fn split_into_blocks(window: TimeWindow, block_minutes: u32) -> Vec<TimeWindow> {
    let step = Duration::minutes(i64::from(block_minutes));
    let mut blocks = Vec::new();
    let mut cursor = window.start;

    loop {
        let (block_end, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 || block_end > window.end {
            break;
        }
        blocks.push(TimeWindow::new(cursor, block_end));
        cursor = block_end;
    }

    blocks
}

/// Schedule one day of study blocks.
///
/// Tasks are stable-sorted by deadline (earliest first), windows are split
/// into candidate blocks in the given order, the candidate list is capped at
/// `max_blocks_per_day`, and tasks are assigned to blocks one-to-one until
/// either side runs out. Tasks left over simply stay unscheduled this cycle.
///
/// Empty tasks or windows produce an empty schedule. A zero block length or
/// capacity is a configuration error.
pub fn schedule_day(
    tasks: &[Task],
    date: NaiveDate,
    windows: &[TimeWindow],
    block_minutes: u32,
    max_blocks_per_day: u32,
) -> Result<Vec<StudyBlock>> {
    if block_minutes == 0 {
        return Err(CoreError::Config(ConfigError::InvalidValue {
            key: "preferred_block_minutes".to_string(),
            message: "must be positive".to_string(),
        }));
    }
    if max_blocks_per_day == 0 {
        return Err(CoreError::Config(ConfigError::InvalidValue {
            key: "max_blocks_per_day".to_string(),
            message: "must be positive".to_string(),
        }));
    }

    if tasks.is_empty() || windows.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted_tasks: Vec<&Task> = tasks.iter().collect();
    sorted_tasks.sort_by_key(|t| t.deadline_date);

    let mut candidate_blocks: Vec<TimeWindow> = Vec::new();
    for window in windows {
        candidate_blocks.extend(split_into_blocks(*window, block_minutes));
    }
    candidate_blocks.truncate(max_blocks_per_day as usize);

    let blocks = sorted_tasks
        .iter()
        .zip(candidate_blocks.iter())
        .map(|(task, slot)| StudyBlock {
            date,
            start_time: slot.start,
            end_time: slot.end,
            task_id: task.task_id.clone(),
            course_id: task.course_id.clone(),
            title: task.title.clone(),
            priority: BLOCK_PRIORITY_LABEL.to_string(),
        })
        .collect();

    Ok(blocks)
}
