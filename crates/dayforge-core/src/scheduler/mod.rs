//! Day scheduler.
//!
//! Turns an unordered-in-time task list into a full 24-hour timeline:
//! - Work and essential tasks are never shortened
//! - Breaks shrink first, then sleep (high intensity only) when over capacity
//! - Remaining flexible time goes to phone, leisure and an evening wind-down
//! - Every compression is explained in a tradeoff message
//!
//! The scheduler is a pure function of its inputs. It performs no I/O and
//! keeps no state between calls.

mod allocation;
mod builder;
mod messages;

use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, info, warn};

use crate::schedule::{ScheduleConfig, ScheduleResult, ScheduleStats};
use crate::task::{Task, TaskType};

use allocation::{estimate_minutes, Allocation, TaskGroups};
use builder::{BlockBuilder, BlockSpec};

pub use messages::format_hours;

/// Shortest phone/social block worth placing (minutes).
pub const PHONE_MIN_BLOCK_MINUTES: i64 = 10;
/// Shortest leisure block worth placing (minutes).
pub const LEISURE_MIN_BLOCK_MINUTES: i64 = 15;
/// Wind-down is placed only when it exceeds this many minutes.
pub const WIND_DOWN_MIN_MINUTES: i64 = 15;
/// Phone/leisure allocations below this are reported as reduced.
pub const REDUCTION_BASELINE_MINUTES: i64 = 30;
/// Nominal request recorded on a reduced phone/leisure block.
pub const REQUESTED_BASELINE_MINUTES: i64 = 60;

/// Fixed parts of every planned day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRules {
    /// Morning routine right after waking (minutes)
    pub morning_routine_minutes: i64,
    /// Lunch length (minutes)
    pub lunch_minutes: i64,
    /// Lunch is placed once the cursor reaches this hour...
    pub lunch_window_start_hour: u32,
    /// ...and before this hour
    pub lunch_window_end_hour: u32,
    /// Cap on the evening wind-down (minutes)
    pub wind_down_max_minutes: i64,
    /// Work blocks longer than this earn a longer following break (minutes)
    pub long_work_threshold_minutes: i64,
    /// Extra break minutes after a long work block
    pub long_work_break_bonus_minutes: i64,
}

impl Default for DayRules {
    fn default() -> Self {
        Self {
            morning_routine_minutes: 30,
            lunch_minutes: 30,
            lunch_window_start_hour: 12,
            lunch_window_end_hour: 14,
            wind_down_max_minutes: 30,
            long_work_threshold_minutes: 120,
            long_work_break_bonus_minutes: 5,
        }
    }
}

/// Rule-based day scheduler.
#[derive(Debug, Clone, Default)]
pub struct DayScheduler {
    rules: DayRules,
}

impl DayScheduler {
    /// Create a scheduler with the default day rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom rules
    pub fn with_rules(rules: DayRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DayRules {
        &self.rules
    }

    fn in_lunch_window(&self, at: NaiveDateTime) -> bool {
        (self.rules.lunch_window_start_hour..self.rules.lunch_window_end_hour).contains(&at.hour())
    }

    fn lunch(&self) -> BlockSpec {
        BlockSpec::synthetic("Lunch", TaskType::Meal, self.rules.lunch_minutes)
    }

    /// Generate the timeline for one day.
    ///
    /// # Arguments
    /// * `tasks` - Tasks for the day, in the order the user entered them
    /// * `config` - Wake/sleep window, intensity and date
    ///
    /// # Returns
    /// Blocks covering wake to next wake, plus tradeoffs, warnings and stats.
    /// Never fails; impossible days come back with a warning attached.
    pub fn generate(&self, tasks: &[Task], config: &ScheduleConfig) -> ScheduleResult {
        let groups = TaskGroups::partition(tasks);
        let alloc = Allocation::compute(&groups, config, &self.rules);

        let mut builder = BlockBuilder::new(config.wake_at());
        builder.push(BlockSpec::synthetic(
            "Morning Routine",
            TaskType::Essential,
            self.rules.morning_routine_minutes,
        ));

        let mut lunch_placed = false;
        for (index, slot) in alloc.work.iter().enumerate() {
            if !lunch_placed && self.in_lunch_window(builder.cursor()) {
                lunch_placed = builder.push(self.lunch());
            }
            builder.push(BlockSpec::for_task(slot.task, slot.minutes));
            if let Some(brk) = alloc.breaks.get(index) {
                builder.push(
                    BlockSpec::synthetic("Break", TaskType::Break, brk.minutes).reduced_from(brk.nominal_minutes),
                );
            }
        }

        for task in &groups.personal {
            if !lunch_placed && self.in_lunch_window(builder.cursor()) {
                lunch_placed = builder.push(self.lunch());
            }
            builder.push(BlockSpec::for_task(task, estimate_minutes(task)));
        }
        if !lunch_placed {
            builder.push(self.lunch());
        }

        if alloc.phone_minutes >= PHONE_MIN_BLOCK_MINUTES {
            builder.push(grouped_spec(&groups.phone, "Phone & Social", alloc.phone_minutes));
        }
        if alloc.leisure_minutes >= LEISURE_MIN_BLOCK_MINUTES {
            builder.push(grouped_spec(&groups.leisure, "Leisure", alloc.leisure_minutes));
        }
        if alloc.wind_down_minutes > WIND_DOWN_MIN_MINUTES {
            builder.push(BlockSpec::synthetic(
                "Evening Wind-down",
                TaskType::Break,
                alloc.wind_down_minutes,
            ));
        }

        let next_wake = config.next_wake_at();
        let nominal_sleep = config.nominal_sleep_minutes();
        let planned_sleep = nominal_sleep - alloc.sleep_borrowed;
        let sleep_available = (next_wake - builder.cursor()).num_minutes();
        let shown_sleep = planned_sleep.min(sleep_available);

        let mut warnings = Vec::new();
        if let Some(message) = messages::shortfall_warning(&alloc, config.intensity) {
            warn!(shortfall_minutes = alloc.shortfall_minutes, "day is over capacity");
            warnings.push(message);
        }

        let sleep_placed = builder.push_until(
            next_wake,
            BlockSpec::synthetic(
                format!("Sleep ({:.1}h)", shown_sleep.max(0) as f64 / 60.0),
                TaskType::Sleep,
                0,
            )
            .reduced_from(nominal_sleep),
        );
        if sleep_available < 0 {
            let overrun = -sleep_available;
            warn!(overrun_minutes = overrun, "timeline runs past next wake");
            warnings.push(messages::overrun_warning(overrun));
        }

        let tradeoffs = messages::tradeoffs(&alloc, &groups, config);
        let blocks = builder.finish();

        let sleep_reduced = alloc.sleep_borrowed > 0
            || !sleep_placed
            || blocks.iter().any(|b| b.block_type == TaskType::Sleep && b.is_reduced);
        let stats = ScheduleStats::from_blocks(&blocks, planned_sleep, sleep_reduced, alloc.flexible_minutes);

        debug!(
            available = alloc.available_minutes,
            required = alloc.required_minutes,
            essential = alloc.essential_minutes,
            nominal_breaks = alloc.nominal_break_minutes(),
            "allocation summary"
        );
        info!(
            date = %config.date,
            intensity = %config.intensity,
            blocks = blocks.len(),
            work_minutes = stats.work_minutes,
            sleep_hours = stats.sleep_hours,
            tradeoffs = tradeoffs.len(),
            warnings = warnings.len(),
            "schedule generated"
        );

        ScheduleResult {
            blocks,
            tradeoffs,
            warnings,
            stats,
        }
    }
}

/// One block standing for several phone or leisure tasks; a single task
/// keeps its own title and id.
fn grouped_spec(tasks: &[&Task], label: &str, minutes: i64) -> BlockSpec {
    let spec = match tasks {
        [only] => BlockSpec::for_task(only, minutes),
        _ => {
            let block_type = if tasks.iter().all(|t| t.task_type == TaskType::Social) {
                TaskType::Social
            } else {
                tasks.first().map(|t| t.task_type).unwrap_or(TaskType::Phone)
            };
            BlockSpec::synthetic(label, block_type, minutes)
        }
    };
    if minutes < REDUCTION_BASELINE_MINUTES {
        spec.reduced_from(REQUESTED_BASELINE_MINUTES)
    } else {
        spec
    }
}

/// Generate a schedule with the default day rules.
pub fn generate(tasks: &[Task], config: &ScheduleConfig) -> ScheduleResult {
    DayScheduler::new().generate(tasks, config)
}
