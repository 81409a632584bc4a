//! Capacity allocation: how many minutes each category gets before layout.
//!
//! Work and essential minutes are fixed inputs. Breaks shrink first, then
//! (high intensity only) sleep is borrowed, and whatever flexible time is left
//! goes to phone, leisure and an evening wind-down.

use tracing::debug;

use super::DayRules;
use crate::intensity::Intensity;
use crate::schedule::{ScheduleConfig, DAY_MINUTES};
use crate::task::{Task, TaskType};

/// Tasks grouped by how the scheduler treats them.
#[derive(Debug, Default)]
pub(crate) struct TaskGroups<'a> {
    pub work: Vec<&'a Task>,
    /// Essential and movement tasks
    pub personal: Vec<&'a Task>,
    /// Phone and social tasks
    pub phone: Vec<&'a Task>,
    pub leisure: Vec<&'a Task>,
}

impl<'a> TaskGroups<'a> {
    pub fn partition(tasks: &'a [Task]) -> Self {
        let mut groups = TaskGroups::default();
        for task in tasks {
            match task.task_type {
                TaskType::Work => groups.work.push(task),
                TaskType::Essential | TaskType::Movement => groups.personal.push(task),
                TaskType::Phone | TaskType::Social => groups.phone.push(task),
                TaskType::Leisure => groups.leisure.push(task),
                TaskType::Break | TaskType::Sleep | TaskType::Meal => {
                    debug!(task_id = %task.id, task_type = %task.task_type, "ignoring system-only task type");
                }
            }
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.personal.is_empty() && self.phone.is_empty() && self.leisure.is_empty()
    }
}

/// Which point of a declared hour range was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangePoint {
    Minimum,
    Midpoint,
    Maximum,
}

impl RangePoint {
    pub fn for_intensity(intensity: Intensity) -> Self {
        match intensity {
            Intensity::Low => Self::Minimum,
            Intensity::Medium => Self::Midpoint,
            Intensity::High => Self::Maximum,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct WorkSlot<'a> {
    pub task: &'a Task,
    pub minutes: i64,
    /// Set when the task declared an hour range
    pub range: Option<(f64, f64, RangePoint)>,
}

/// Stored estimate, bounded to one day.
pub(crate) fn estimate_minutes(task: &Task) -> i64 {
    i64::from(task.estimated_minutes).min(DAY_MINUTES)
}

/// Resolve the duration of one work task for an intensity.
///
/// Plan files are decoded without validation, so a range that is not a
/// usable number of hours falls back to the estimate and every result is
/// bounded to one day.
pub(crate) fn work_minutes(task: &Task, intensity: Intensity) -> i64 {
    let hours = task.hour_range().map(|(min, max)| match RangePoint::for_intensity(intensity) {
        RangePoint::Minimum => min,
        RangePoint::Midpoint => (min + max) / 2.0,
        RangePoint::Maximum => max,
    });
    match hours {
        Some(hours) if hours.is_finite() && hours >= 0.0 => ((hours * 60.0).round() as i64).min(DAY_MINUTES),
        _ => estimate_minutes(task),
    }
}

/// A break between two consecutive work blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BreakSlot {
    /// Intensity break length plus any long-block bonus
    pub nominal_minutes: i64,
    pub minutes: i64,
}

impl BreakSlot {
    pub fn shrink(&self) -> i64 {
        self.nominal_minutes - self.minutes
    }

    /// Minutes this break can still give up before reaching half its nominal length.
    fn room(&self) -> i64 {
        self.nominal_minutes / 2 - self.shrink()
    }
}

/// Everything the layout pass needs to place blocks.
#[derive(Debug)]
pub(crate) struct Allocation<'a> {
    pub work: Vec<WorkSlot<'a>>,
    pub breaks: Vec<BreakSlot>,
    pub essential_minutes: i64,
    pub available_minutes: i64,
    pub required_minutes: i64,
    /// Signed flexible minutes after all reductions
    pub flexible_minutes: i64,
    pub sleep_borrowed: i64,
    pub phone_minutes: i64,
    pub leisure_minutes: i64,
    pub wind_down_minutes: i64,
    /// Deficit left after every reduction; zero when the day fits
    pub shortfall_minutes: i64,
}

impl<'a> Allocation<'a> {
    pub fn total_work_minutes(&self) -> i64 {
        self.work.iter().map(|w| w.minutes).sum()
    }

    pub fn nominal_break_minutes(&self) -> i64 {
        self.breaks.iter().map(|b| b.nominal_minutes).sum()
    }

    pub fn breaks_shortened(&self) -> bool {
        self.breaks.iter().any(|b| b.shrink() > 0)
    }

    pub fn compute(groups: &TaskGroups<'a>, config: &ScheduleConfig, rules: &DayRules) -> Self {
        let profile = config.intensity.profile();

        let work: Vec<WorkSlot<'a>> = groups
            .work
            .iter()
            .map(|&task| WorkSlot {
                task,
                minutes: work_minutes(task, config.intensity),
                range: task
                    .hour_range()
                    .map(|(min, max)| (min, max, RangePoint::for_intensity(config.intensity))),
            })
            .collect();
        let total_work: i64 = work.iter().map(|w| w.minutes).sum();

        let essential_minutes: i64 = groups
            .personal
            .iter()
            .map(|&t| estimate_minutes(t))
            .sum();

        // One break between each pair of consecutive work blocks.
        let mut breaks: Vec<BreakSlot> = work
            .iter()
            .take(work.len().saturating_sub(1))
            .map(|preceding| {
                let bonus = if preceding.minutes > rules.long_work_threshold_minutes {
                    rules.long_work_break_bonus_minutes
                } else {
                    0
                };
                let nominal = profile.break_minutes + bonus;
                BreakSlot {
                    nominal_minutes: nominal,
                    minutes: nominal,
                }
            })
            .collect();
        let break_total: i64 = breaks.iter().map(|b| b.nominal_minutes).sum();

        let overhead = rules.morning_routine_minutes + rules.lunch_minutes;
        let available_minutes = config.available_minutes();
        let required_minutes = total_work + essential_minutes + break_total + overhead;
        let mut flexible = available_minutes - required_minutes;

        debug!(
            total_work,
            essential_minutes,
            break_total,
            available_minutes,
            flexible,
            "capacity before reductions"
        );

        // Breaks first, spread evenly, each down to half its nominal length.
        let mut remaining = -flexible;
        loop {
            let open: Vec<usize> = (0..breaks.len()).filter(|&i| breaks[i].room() > 0).collect();
            if remaining <= 0 || open.is_empty() {
                break;
            }
            let step = (remaining + open.len() as i64 - 1) / open.len() as i64;
            for i in open {
                let take = step.min(breaks[i].room());
                breaks[i].minutes -= take;
                remaining -= take;
            }
        }
        let recovered: i64 = breaks.iter().map(BreakSlot::shrink).sum();
        if recovered > 0 {
            flexible += recovered;
            debug!(recovered, flexible, "breaks shortened");
        }

        // Then sleep, bounded by both the intensity ceiling and the floor.
        let mut sleep_borrowed = 0;
        if flexible < 0 && profile.sleep_reduction_minutes > 0 {
            let floor_room = (config.nominal_sleep_minutes() - profile.min_sleep_minutes()).max(0);
            sleep_borrowed = (-flexible).min(profile.sleep_reduction_minutes).min(floor_room);
            flexible += sleep_borrowed;
            debug!(sleep_borrowed, floor_room, flexible, "sleep borrowed");
        }

        let shortfall_minutes = (-flexible).max(0);

        let mut phone_minutes = 0;
        let mut leisure_minutes = 0;
        let mut wind_down_minutes = 0;
        if flexible > 0 && !groups.is_empty() {
            if !groups.phone.is_empty() {
                phone_minutes = profile.max_phone_minutes.min(flexible * 3 / 10);
            }
            if !groups.leisure.is_empty() {
                leisure_minutes = profile.max_leisure_minutes.min((flexible - phone_minutes) / 2);
            }
            wind_down_minutes = rules
                .wind_down_max_minutes
                .min(flexible - phone_minutes - leisure_minutes);
        }

        Allocation {
            work,
            breaks,
            essential_minutes,
            available_minutes,
            required_minutes,
            flexible_minutes: flexible,
            sleep_borrowed,
            phone_minutes,
            leisure_minutes,
            wind_down_minutes,
            shortfall_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config(wake: &str, sleep: &str, intensity: Intensity) -> ScheduleConfig {
        ScheduleConfig::parse(wake, sleep, intensity, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()).unwrap()
    }

    fn work(title: &str) -> Task {
        Task::new(title, TaskType::Work).unwrap()
    }

    #[test]
    fn range_resolves_by_intensity() {
        let task = work("Thesis").with_hour_range(2.0, 4.0).unwrap();
        assert_eq!(work_minutes(&task, Intensity::Low), 120);
        assert_eq!(work_minutes(&task, Intensity::Medium), 180);
        assert_eq!(work_minutes(&task, Intensity::High), 240);
    }

    #[test]
    fn midpoint_rounds_to_nearest_minute() {
        let task = work("Odd").with_hour_range(1.0, 1.51).unwrap();
        // (1.0 + 1.51) / 2 * 60 = 75.3
        assert_eq!(work_minutes(&task, Intensity::Medium), 75);
    }

    #[test]
    fn no_range_uses_estimate() {
        assert_eq!(work_minutes(&work("Plain"), Intensity::High), 90);
    }

    #[test]
    fn partition_ignores_system_types() {
        let mut sleep = work("Nap");
        sleep.task_type = TaskType::Sleep;
        let tasks = vec![
            work("a"),
            Task::new("b", TaskType::Movement).unwrap(),
            Task::new("c", TaskType::Social).unwrap(),
            Task::new("d", TaskType::Leisure).unwrap(),
            sleep,
        ];
        let groups = TaskGroups::partition(&tasks);
        assert_eq!(groups.work.len(), 1);
        assert_eq!(groups.personal.len(), 1);
        assert_eq!(groups.phone.len(), 1);
        assert_eq!(groups.leisure.len(), 1);
    }

    #[test]
    fn break_slots_sit_between_work_blocks() {
        let tasks = vec![work("a"), work("b"), work("c")];
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::High), &DayRules::default());
        assert_eq!(alloc.breaks.len(), 2);
        assert_eq!(alloc.nominal_break_minutes(), 20);
        assert_eq!(alloc.required_minutes, 270 + 20 + 60);
        assert_eq!(alloc.flexible_minutes, 960 - 350);
    }

    #[test]
    fn long_work_block_earns_break_bonus() {
        let tasks = vec![work("long").with_hour_range(3.0, 3.0).unwrap(), work("short")];
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::Medium), &DayRules::default());
        assert_eq!(alloc.breaks[0].nominal_minutes, 20);
    }

    #[test]
    fn deficit_shrinks_breaks_before_sleep() {
        // 4 x 4h at high = 960 work + 3 x (10 + 5) breaks + 60 overhead in a 960 window.
        let tasks: Vec<Task> = (0..4)
            .map(|i| work(&format!("w{i}")).with_hour_range(4.0, 4.0).unwrap())
            .collect();
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::High), &DayRules::default());
        // 105 over: each break gives 7 of its 15, sleep gives 60.
        assert!(alloc.breaks.iter().all(|b| b.minutes == 8 && b.nominal_minutes == 15));
        assert_eq!(alloc.sleep_borrowed, 60);
        assert_eq!(alloc.shortfall_minutes, 24);
    }

    #[test]
    fn small_deficit_only_touches_breaks() {
        // 3 x 288 work, 2 x (10 + 5) breaks, 60 overhead in a 960 window.
        let tasks: Vec<Task> = (0..3)
            .map(|i| work(&format!("w{i}")).with_hour_range(4.8, 4.8).unwrap())
            .collect();
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::High), &DayRules::default());
        // 864 + 30 + 60 = 954 -> fits
        assert_eq!(alloc.flexible_minutes, 6);
        assert!(!alloc.breaks_shortened());

        let tight = config("07:00", "22:50", Intensity::High);
        let alloc = Allocation::compute(&groups, &tight, &DayRules::default());
        // deficit 4 across 2 breaks -> shrink 2 each
        assert!(alloc.breaks.iter().all(|b| b.shrink() == 2));
        assert_eq!(alloc.sleep_borrowed, 0);
        assert_eq!(alloc.flexible_minutes, 0);
    }

    #[test]
    fn bonus_breaks_reach_half_nominal_before_sleep_is_borrowed() {
        // 3 x 150 at high: breaks are 10 + 5 each; 450 + 30 + 60 = 540 in 525.
        let tasks: Vec<Task> = (0..3)
            .map(|i| work(&format!("w{i}")).with_hour_range(2.5, 2.5).unwrap())
            .collect();
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "15:45", Intensity::High), &DayRules::default());
        assert!(alloc.breaks.iter().all(|b| b.nominal_minutes == 15 && b.minutes == 8));
        assert_eq!(alloc.sleep_borrowed, 1);
        assert_eq!(alloc.flexible_minutes, 0);
    }

    #[test]
    fn uneven_breaks_share_the_deficit() {
        // First break follows a long block (20 nominal), second does not (15).
        let tasks = vec![
            work("long").with_hour_range(3.0, 3.0).unwrap(),
            work("short"),
            work("last"),
        ];
        let groups = TaskGroups::partition(&tasks);
        // 180 + 90 + 90 + 35 + 60 = 455 in 440: 15 over.
        let alloc = Allocation::compute(&groups, &config("07:00", "14:20", Intensity::Medium), &DayRules::default());
        assert_eq!(alloc.breaks[0].minutes, 12);
        assert_eq!(alloc.breaks[1].minutes, 8);
        assert_eq!(alloc.shortfall_minutes, 0);
        assert_eq!(alloc.flexible_minutes, 0);
    }

    #[test]
    fn unusable_ranges_fall_back_to_estimate() {
        let mut nan = work("nan");
        nan.min_hours = Some(f64::NAN);
        nan.max_hours = Some(f64::NAN);
        assert_eq!(work_minutes(&nan, Intensity::Medium), 90);

        let mut negative = work("negative");
        negative.min_hours = Some(-3.0);
        negative.max_hours = Some(-1.0);
        assert_eq!(work_minutes(&negative, Intensity::High), 90);

        let mut huge = work("huge");
        huge.min_hours = Some(1e12);
        huge.max_hours = Some(1e12);
        assert_eq!(work_minutes(&huge, Intensity::Low), DAY_MINUTES);

        let mut long_estimate = Task::new("errand", TaskType::Essential).unwrap();
        long_estimate.estimated_minutes = u32::MAX;
        assert_eq!(estimate_minutes(&long_estimate), DAY_MINUTES);
    }

    #[test]
    fn medium_never_borrows_sleep() {
        let tasks: Vec<Task> = (0..3)
            .map(|i| work(&format!("w{i}")).with_hour_range(5.0, 5.0).unwrap())
            .collect();
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::Medium), &DayRules::default());
        assert_eq!(alloc.sleep_borrowed, 0);
        assert!(alloc.shortfall_minutes > 0);
    }

    #[test]
    fn sleep_borrow_respects_floor() {
        // 7h sleep window at high: only 30 min above the 6.5h floor.
        let tasks: Vec<Task> = (0..3)
            .map(|i| work(&format!("w{i}")).with_hour_range(6.0, 6.0).unwrap())
            .collect();
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "00:00", Intensity::High), &DayRules::default());
        assert_eq!(alloc.sleep_borrowed, 30);
    }

    #[test]
    fn flexible_time_split_between_phone_leisure_and_wind_down() {
        let tasks = vec![
            work("a"),
            Task::new("scroll", TaskType::Phone).unwrap(),
            Task::new("film", TaskType::Leisure).unwrap(),
        ];
        let groups = TaskGroups::partition(&tasks);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::Low), &DayRules::default());
        // flexible = 960 - 150 = 810
        assert_eq!(alloc.flexible_minutes, 810);
        assert_eq!(alloc.phone_minutes, 60);
        assert_eq!(alloc.leisure_minutes, 120);
        assert_eq!(alloc.wind_down_minutes, 30);
    }

    #[test]
    fn no_tasks_means_no_flexible_allocation() {
        let groups = TaskGroups::partition(&[]);
        let alloc = Allocation::compute(&groups, &config("07:00", "23:00", Intensity::Low), &DayRules::default());
        assert_eq!(alloc.flexible_minutes, 900);
        assert_eq!(alloc.wind_down_minutes, 0);
        assert_eq!(alloc.phone_minutes, 0);
    }
}
