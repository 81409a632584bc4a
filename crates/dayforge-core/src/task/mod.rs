//! Task types for the day planner.
//!
//! Users never pick a duration: each task type maps to a default length, and
//! work tasks may carry an acceptable hour range that the intensity setting
//! resolves at scheduling time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Category of a task or time block.
///
/// `Break`, `Sleep` and `Meal` are synthesized by the scheduler; the rest can
/// be entered by a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Work,
    Essential,
    Movement,
    Break,
    Phone,
    Social,
    Leisure,
    Sleep,
    Meal,
}

impl TaskType {
    /// Every variant, in declaration order.
    pub const ALL: [TaskType; 9] = [
        TaskType::Work,
        TaskType::Essential,
        TaskType::Movement,
        TaskType::Break,
        TaskType::Phone,
        TaskType::Social,
        TaskType::Leisure,
        TaskType::Sleep,
        TaskType::Meal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Essential => "essential",
            Self::Movement => "movement",
            Self::Break => "break",
            Self::Phone => "phone",
            Self::Social => "social",
            Self::Leisure => "leisure",
            Self::Sleep => "sleep",
            Self::Meal => "meal",
        }
    }

    /// Default duration assigned to a new task of this type.
    pub fn default_minutes(&self) -> u32 {
        match self {
            Self::Work => 90,
            Self::Essential => 30,
            Self::Movement => 45,
            Self::Break => 15,
            Self::Phone | Self::Social => 30,
            Self::Leisure => 60,
            Self::Sleep => 480,
            Self::Meal => 30,
        }
    }

    pub fn is_user_creatable(&self) -> bool {
        !matches!(self, Self::Break | Self::Sleep | Self::Meal)
    }

    /// Whether blocks of this type may be compressed under time pressure.
    pub fn is_flexible(&self) -> bool {
        !matches!(self, Self::Work | Self::Essential)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| ValidationError::UnknownTaskType(s.to_string()))
    }
}

/// A task entered for a day, without any time assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Display text
    pub title: String,
    /// Task category
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// System-assigned duration from [`TaskType::default_minutes`]
    pub estimated_minutes: u32,
    /// Lower bound of the acceptable work range, in hours
    #[serde(default)]
    pub min_hours: Option<f64>,
    /// Upper bound of the acceptable work range, in hours
    #[serde(default)]
    pub max_hours: Option<f64>,
    /// False for work and essential tasks
    pub is_flexible: bool,
}

impl Task {
    /// Create a user task with the default duration for its type.
    ///
    /// # Errors
    /// Returns an error if the type is synthesized by the scheduler.
    pub fn new(title: impl Into<String>, task_type: TaskType) -> Result<Self, ValidationError> {
        if !task_type.is_user_creatable() {
            return Err(ValidationError::NotUserCreatable(task_type));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            task_type,
            estimated_minutes: task_type.default_minutes(),
            min_hours: None,
            max_hours: None,
            is_flexible: task_type.is_flexible(),
        })
    }

    /// Attach an acceptable hour range to a work task.
    ///
    /// # Errors
    /// Returns an error for non-work tasks, bounds outside `0..=24`, or
    /// `min > max`.
    pub fn with_hour_range(mut self, min_hours: f64, max_hours: f64) -> Result<Self, ValidationError> {
        if self.task_type != TaskType::Work {
            return Err(ValidationError::RangeOnNonWork(self.task_type));
        }
        let in_bounds = |h: f64| h.is_finite() && (0.0..=24.0).contains(&h);
        if !in_bounds(min_hours) || !in_bounds(max_hours) {
            return Err(ValidationError::InvalidHourRange {
                min: min_hours,
                max: max_hours,
                message: "hours must be between 0 and 24".to_string(),
            });
        }
        if min_hours > max_hours {
            return Err(ValidationError::InvalidHourRange {
                min: min_hours,
                max: max_hours,
                message: "minimum exceeds maximum".to_string(),
            });
        }
        self.min_hours = Some(min_hours);
        self.max_hours = Some(max_hours);
        Ok(self)
    }

    /// The declared work range, only when both bounds are set.
    pub fn hour_range(&self) -> Option<(f64, f64)> {
        match (self.min_hours, self.max_hours) {
            (Some(min), Some(max)) => Some((min.min(max), min.max(max))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_lookup_table() {
        assert_eq!(Task::new("Deep work", TaskType::Work).unwrap().estimated_minutes, 90);
        assert_eq!(Task::new("Groceries", TaskType::Essential).unwrap().estimated_minutes, 30);
        assert_eq!(Task::new("Run", TaskType::Movement).unwrap().estimated_minutes, 45);
        assert_eq!(Task::new("Texts", TaskType::Phone).unwrap().estimated_minutes, 30);
        assert_eq!(Task::new("Call mom", TaskType::Social).unwrap().estimated_minutes, 30);
        assert_eq!(Task::new("Novel", TaskType::Leisure).unwrap().estimated_minutes, 60);
    }

    #[test]
    fn flexibility_excludes_work_and_essential() {
        assert!(!Task::new("a", TaskType::Work).unwrap().is_flexible);
        assert!(!Task::new("b", TaskType::Essential).unwrap().is_flexible);
        assert!(Task::new("c", TaskType::Movement).unwrap().is_flexible);
        assert!(Task::new("d", TaskType::Leisure).unwrap().is_flexible);
    }

    #[test]
    fn system_types_are_rejected() {
        for t in [TaskType::Break, TaskType::Sleep, TaskType::Meal] {
            assert_eq!(
                Task::new("x", t).unwrap_err(),
                ValidationError::NotUserCreatable(t)
            );
        }
    }

    #[test]
    fn hour_range_only_on_work() {
        let err = Task::new("walk", TaskType::Movement)
            .unwrap()
            .with_hour_range(1.0, 2.0)
            .unwrap_err();
        assert_eq!(err, ValidationError::RangeOnNonWork(TaskType::Movement));
    }

    #[test]
    fn hour_range_rejects_inverted_and_out_of_bounds() {
        let task = Task::new("w", TaskType::Work).unwrap();
        assert!(task.clone().with_hour_range(4.0, 2.0).is_err());
        assert!(task.clone().with_hour_range(-1.0, 2.0).is_err());
        assert!(task.with_hour_range(2.0, 25.0).is_err());
    }

    #[test]
    fn hour_range_requires_both_bounds() {
        let mut task = Task::new("w", TaskType::Work).unwrap();
        task.min_hours = Some(2.0);
        assert_eq!(task.hour_range(), None);
        task.max_hours = Some(4.0);
        assert_eq!(task.hour_range(), Some((2.0, 4.0)));
    }

    #[test]
    fn task_type_parses_case_insensitively() {
        assert_eq!("Work".parse::<TaskType>().unwrap(), TaskType::Work);
        assert_eq!(" leisure ".parse::<TaskType>().unwrap(), TaskType::Leisure);
        assert!("nap".parse::<TaskType>().is_err());
    }

    #[test]
    fn task_serializes_type_field() {
        let task = Task::new("Report", TaskType::Work).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "work");
        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }
}
