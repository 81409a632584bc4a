//! Schedule types: the day configuration going in and the timeline coming out.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::intensity::Intensity;
use crate::task::TaskType;

/// Minutes from one wake time to the next.
pub const DAY_MINUTES: i64 = 24 * 60;

/// A block on the generated timeline.
///
/// Blocks are produced fresh on every generation and never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
    #[serde(rename = "type")]
    pub block_type: TaskType,
    /// Originating task; `None` for synthetic blocks
    pub task_id: Option<String>,
    /// Shortened from its nominal length
    #[serde(default)]
    pub is_reduced: bool,
    /// Nominal length before reduction, only set when `is_reduced`
    #[serde(default)]
    pub original_minutes: Option<i64>,
}

impl TimeBlock {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Same timing, type and reduction state, ignoring the generated id.
    pub fn same_slot(&self, other: &TimeBlock) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.block_type == other.block_type
            && self.label == other.label
            && self.task_id == other.task_id
            && self.is_reduced == other.is_reduced
            && self.original_minutes == other.original_minutes
    }
}

/// Input to a single schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub wake: NaiveTime,
    pub target_sleep: NaiveTime,
    pub intensity: Intensity,
    pub date: NaiveDate,
}

/// Parse an "HH:mm" time of day.
///
/// # Errors
/// Returns an error when the string is not a valid 24-hour time.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTimeOfDay {
        value: value.to_string(),
    })
}

/// Parse a "YYYY-MM-DD" calendar date.
///
/// # Errors
/// Returns an error when the string is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

impl ScheduleConfig {
    pub fn new(wake: NaiveTime, target_sleep: NaiveTime, intensity: Intensity, date: NaiveDate) -> Self {
        Self {
            wake,
            target_sleep,
            intensity,
            date,
        }
    }

    /// Build from "HH:mm" strings.
    ///
    /// # Errors
    /// Returns an error if either time string is malformed.
    pub fn parse(
        wake: &str,
        target_sleep: &str,
        intensity: Intensity,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(
            parse_time_of_day(wake)?,
            parse_time_of_day(target_sleep)?,
            intensity,
            date,
        ))
    }

    pub fn wake_at(&self) -> NaiveDateTime {
        self.date.and_time(self.wake)
    }

    /// The end of the planned day: wake time on the following day.
    pub fn next_wake_at(&self) -> NaiveDateTime {
        self.wake_at() + Duration::minutes(DAY_MINUTES)
    }

    /// Target sleep on the wake date; a target at or before wake rolls over
    /// to the next calendar day.
    pub fn sleep_target_at(&self) -> NaiveDateTime {
        let same_day = self.date.and_time(self.target_sleep);
        if same_day <= self.wake_at() {
            same_day + Duration::days(1)
        } else {
            same_day
        }
    }

    /// Minutes between wake and target sleep.
    pub fn available_minutes(&self) -> i64 {
        (self.sleep_target_at() - self.wake_at()).num_minutes()
    }

    /// Minutes between target sleep and the next wake.
    pub fn nominal_sleep_minutes(&self) -> i64 {
        DAY_MINUTES - self.available_minutes()
    }
}

/// Aggregates computed from the final block list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub minutes_by_type: BTreeMap<TaskType, i64>,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub phone_minutes: i64,
    pub leisure_minutes: i64,
    /// Sleep before the next wake, bounded by the planned sleep window
    pub sleep_hours: f64,
    pub sleep_reduced: bool,
    /// Signed flexible minutes left after reductions
    pub flexible_minutes: i64,
}

impl ScheduleStats {
    /// Sum block durations per type.
    ///
    /// `planned_sleep_minutes` is the sleep window after any borrowing; a
    /// sleep block that also absorbs unallocated evening time is counted in
    /// `minutes_by_type` but `sleep_hours` reports at most the planned window.
    pub fn from_blocks(
        blocks: &[TimeBlock],
        planned_sleep_minutes: i64,
        sleep_reduced: bool,
        flexible_minutes: i64,
    ) -> Self {
        let mut minutes_by_type = BTreeMap::new();
        for block in blocks {
            *minutes_by_type.entry(block.block_type).or_insert(0) += block.duration_minutes();
        }
        let total = |t: TaskType| minutes_by_type.get(&t).copied().unwrap_or(0);

        let sleep_block_minutes = total(TaskType::Sleep);
        let sleep_minutes = sleep_block_minutes.min(planned_sleep_minutes.max(0));

        Self {
            work_minutes: total(TaskType::Work),
            break_minutes: total(TaskType::Break),
            phone_minutes: total(TaskType::Phone) + total(TaskType::Social),
            leisure_minutes: total(TaskType::Leisure),
            sleep_hours: sleep_minutes as f64 / 60.0,
            sleep_reduced,
            flexible_minutes,
            minutes_by_type,
        }
    }
}

/// Output of one schedule generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub blocks: Vec<TimeBlock>,
    /// Display-ready explanations of compressions applied, in order
    pub tradeoffs: Vec<String>,
    /// Display-ready notices about time that could not be fit
    pub warnings: Vec<String>,
    pub stats: ScheduleStats,
}

impl ScheduleResult {
    pub fn blocks_of(&self, block_type: TaskType) -> impl Iterator<Item = &TimeBlock> {
        self.blocks.iter().filter(move |b| b.block_type == block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn parse_accepts_hh_mm() {
        let config = ScheduleConfig::parse("07:00", "23:00", Intensity::Low, date()).unwrap();
        assert_eq!(config.available_minutes(), 960);
        assert_eq!(config.nominal_sleep_minutes(), 480);
        assert_eq!(
            config.next_wake_at(),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap().and_hms_opt(7, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ScheduleConfig::parse("7am", "23:00", Intensity::Low, date()).is_err());
        assert!(ScheduleConfig::parse("07:00", "25:00", Intensity::Low, date()).is_err());
    }

    #[test]
    fn sleep_after_midnight_rolls_over() {
        let config = ScheduleConfig::parse("08:00", "00:30", Intensity::Medium, date()).unwrap();
        assert_eq!(config.available_minutes(), 16 * 60 + 30);
        assert_eq!(config.nominal_sleep_minutes(), 7 * 60 + 30);
    }

    #[test]
    fn parse_date_rejects_invalid() {
        assert_eq!(parse_date("2026-03-02").unwrap(), date());
        assert!(parse_date("2026-13-40").is_err());
    }

    #[test]
    fn stats_cap_sleep_hours_at_planned_window() {
        let start = date().and_hms_opt(20, 0, 0).unwrap();
        let blocks = vec![TimeBlock {
            id: "s".into(),
            start,
            end: start + Duration::hours(11),
            label: "Sleep (8.0h)".into(),
            block_type: TaskType::Sleep,
            task_id: None,
            is_reduced: false,
            original_minutes: None,
        }];
        let stats = ScheduleStats::from_blocks(&blocks, 480, false, 0);
        assert_eq!(stats.minutes_by_type[&TaskType::Sleep], 660);
        assert!((stats.sleep_hours - 8.0).abs() < f64::EPSILON);
    }
}
