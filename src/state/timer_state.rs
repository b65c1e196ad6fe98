//! Timer state record and its persisted JSON shape

use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize};

/// Default lower bound for a countdown draw, in seconds
pub const DEFAULT_MIN_SECONDS: u32 = 60;
/// Default upper bound for a countdown draw, in seconds
pub const DEFAULT_MAX_SECONDS: u32 = 60 * 3;

/// Persisted countdown/rule record
///
/// Keys keep the camelCase shape written by the game-side script, so an
/// existing `pvptimer` slot loads without migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerState {
    /// Seconds left before the next toggle
    ///
    /// Older records may also carry a stray `currenTime` key; it is ignored.
    #[serde(rename = "currentTime")]
    pub current_countdown: u32,
    /// Whether the countdown is running
    pub enabled: bool,
    /// Last value applied to the PvP rule
    #[serde(rename = "pvpState")]
    pub rule_state: bool,
    #[serde(rename = "minTime", deserialize_with = "lenient_seconds")]
    pub min_seconds: u32,
    #[serde(rename = "maxTime", deserialize_with = "lenient_seconds")]
    pub max_seconds: u32,
}

/// Read a bound that older records may hold as a negative number
///
/// Out-of-range values become 0, which fails `has_valid_bounds`.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(u32::try_from(value).unwrap_or(0))
}

impl TimerState {
    /// Create the record a fresh install starts from
    pub fn new() -> Self {
        Self {
            current_countdown: 0,
            enabled: false,
            rule_state: false,
            min_seconds: DEFAULT_MIN_SECONDS,
            max_seconds: DEFAULT_MAX_SECONDS,
        }
    }

    /// Check `0 < min <= max`
    pub fn has_valid_bounds(&self) -> bool {
        self.min_seconds > 0 && self.min_seconds <= self.max_seconds
    }

    /// Closed interval countdowns are drawn from
    pub fn countdown_range(&self) -> RangeInclusive<u32> {
        self.min_seconds..=self.max_seconds.max(self.min_seconds)
    }

    /// Value the rule will take at the next toggle
    pub fn next_rule_state(&self) -> bool {
        !self.rule_state
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
