//! User study profile and the capacity adaptation rule.
//!
//! The profile is a single pair of scheduling preferences. Adaptation is a
//! hysteresis controller over `max_blocks_per_day`: it reacts only to the
//! most recent reflection, with no smoothing across history.

use serde::{Deserialize, Serialize};

/// Lower clamp for the daily block capacity.
pub const MIN_BLOCKS_PER_DAY: u32 = 1;
/// Upper clamp for the daily block capacity.
pub const MAX_BLOCKS_PER_DAY: u32 = 5;

/// Scheduling preferences for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default = "default_block_minutes")]
    pub preferred_block_minutes: u32,
    #[serde(default = "default_max_blocks")]
    pub max_blocks_per_day: u32,
}

fn default_block_minutes() -> u32 {
    45
}

fn default_max_blocks() -> u32 {
    3
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            preferred_block_minutes: default_block_minutes(),
            max_blocks_per_day: default_max_blocks(),
        }
    }
}

/// Partial profile override applied at setup.
///
/// Missing fields mean "keep current value".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileOverrides {
    #[serde(default)]
    pub preferred_block_minutes: Option<u32>,
    #[serde(default)]
    pub max_blocks_per_day: Option<u32>,
}

impl Profile {
    /// Apply setup-time overrides in place.
    pub fn apply_overrides(&mut self, overrides: &ProfileOverrides) {
        if let Some(minutes) = overrides.preferred_block_minutes {
            self.preferred_block_minutes = minutes;
        }
        if let Some(blocks) = overrides.max_blocks_per_day {
            self.max_blocks_per_day = blocks;
        }
    }
}

/// Adapt the daily block capacity after a reflection.
///
/// First match wins:
/// - rating >= 4 with at least one partial task: struggled, step down (floor 1)
/// - rating <= 2, no partials, and completions filled capacity: step up (ceiling 5)
/// - otherwise unchanged
pub fn adapt_max_blocks(
    current_max_blocks: u32,
    difficulty_rating: u32,
    partial_count: usize,
    completed_count: usize,
) -> u32 {
    if difficulty_rating >= 4 && partial_count > 0 {
        current_max_blocks.saturating_sub(1).max(MIN_BLOCKS_PER_DAY)
    } else if difficulty_rating <= 2
        && partial_count == 0
        && completed_count >= current_max_blocks as usize
    {
        (current_max_blocks + 1).min(MAX_BLOCKS_PER_DAY)
    } else {
        current_max_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struggle_steps_down() {
        assert_eq!(adapt_max_blocks(3, 4, 1, 0), 2);
        assert_eq!(adapt_max_blocks(3, 5, 2, 1), 2);
    }

    #[test]
    fn struggle_floors_at_one() {
        assert_eq!(adapt_max_blocks(1, 5, 3, 0), 1);
    }

    #[test]
    fn easy_and_full_capacity_steps_up() {
        assert_eq!(adapt_max_blocks(3, 1, 0, 3), 4);
        assert_eq!(adapt_max_blocks(2, 2, 0, 5), 3);
    }

    #[test]
    fn easy_ceils_at_five() {
        assert_eq!(adapt_max_blocks(5, 1, 0, 5), 5);
    }

    #[test]
    fn easy_but_under_capacity_is_noop() {
        assert_eq!(adapt_max_blocks(3, 1, 0, 2), 3);
    }

    #[test]
    fn easy_with_partials_is_noop() {
        assert_eq!(adapt_max_blocks(3, 1, 1, 3), 3);
    }

    #[test]
    fn rating_three_never_changes_capacity() {
        for current in 1..=5 {
            for partial in 0..3 {
                for completed in 0..6 {
                    assert_eq!(adapt_max_blocks(current, 3, partial, completed), current);
                }
            }
        }
    }

    #[test]
    fn repeated_adaptation_stays_in_bounds() {
        // Alternate worst-case signals starting at the default capacity.
        let mut current = Profile::default().max_blocks_per_day;
        for i in 0..20 {
            current = if i % 2 == 0 {
                adapt_max_blocks(current, 5, 2, 0)
            } else {
                adapt_max_blocks(current, 1, 0, 5)
            };
            assert!((MIN_BLOCKS_PER_DAY..=MAX_BLOCKS_PER_DAY).contains(&current));
        }
    }

    #[test]
    fn overrides_apply_partially() {
        let mut profile = Profile::default();
        profile.apply_overrides(&ProfileOverrides {
            preferred_block_minutes: Some(30),
            max_blocks_per_day: None,
        });
        assert_eq!(profile.preferred_block_minutes, 30);
        assert_eq!(profile.max_blocks_per_day, 3);
    }
}
