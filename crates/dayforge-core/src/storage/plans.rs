//! Per-day plan files.
//!
//! Each calendar day is one JSON file, `plans/YYYY-MM-DD.json`, holding the
//! day's tasks and the last generated schedule. The scheduler never reads
//! these; callers snapshot the tasks, generate, and store the result back.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::{CoreError, Result};
use crate::schedule::ScheduleResult;
use crate::task::Task;

/// Everything stored for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Last generated schedule; cleared whenever the task list changes
    #[serde(default)]
    pub result: Option<ScheduleResult>,
}

impl DayPlan {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
            result: None,
        }
    }
}

/// JSON file store keyed by date.
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    /// Open a store rooted at `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the store under the application data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable.
    pub fn open_default() -> Result<Self> {
        Self::open(data_dir()?.join("plans"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    /// Load the plan for a date; a missing file is an empty plan.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(&self, date: NaiveDate) -> Result<DayPlan> {
        let path = self.path_for(date);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(DayPlan::new(date)),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&content).map_err(|source| CoreError::CorruptPlan { path, source })
    }

    /// Write a plan, replacing any previous file for its date.
    ///
    /// # Errors
    /// Returns an error if the plan cannot be serialized or written.
    pub fn save(&self, plan: &DayPlan) -> Result<()> {
        let path = self.path_for(plan.date);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(plan)?)?;
        std::fs::rename(&tmp, &path)?;
        debug!(date = %plan.date, tasks = plan.tasks.len(), "plan saved");
        Ok(())
    }

    /// Append a task to a day's list.
    ///
    /// # Errors
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn add_task(&self, date: NaiveDate, task: Task) -> Result<DayPlan> {
        let mut plan = self.load(date)?;
        plan.tasks.push(task);
        plan.result = None;
        self.save(&plan)?;
        Ok(plan)
    }

    /// Remove a task by id. Returns whether anything was removed.
    ///
    /// # Errors
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn remove_task(&self, date: NaiveDate, task_id: &str) -> Result<bool> {
        let mut plan = self.load(date)?;
        let before = plan.tasks.len();
        plan.tasks.retain(|t| t.id != task_id);
        if plan.tasks.len() == before {
            return Ok(false);
        }
        plan.result = None;
        self.save(&plan)?;
        Ok(true)
    }

    /// Store a freshly generated schedule for a date.
    ///
    /// # Errors
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn save_result(&self, date: NaiveDate, result: ScheduleResult) -> Result<DayPlan> {
        let mut plan = self.load(date)?;
        plan.result = Some(result);
        self.save(&plan)?;
        Ok(plan)
    }

    /// Dates that have a plan file, oldest first.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intensity::Intensity;
    use crate::schedule::ScheduleConfig;
    use crate::scheduler::generate;
    use crate::task::TaskType;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn store() -> (tempfile::TempDir, PlanStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::open(dir.path().join("plans")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_day_is_empty() {
        let (_dir, store) = store();
        let plan = store.load(date(2)).unwrap();
        assert!(plan.tasks.is_empty());
        assert!(plan.result.is_none());
    }

    #[test]
    fn tasks_persist_in_order() {
        let (_dir, store) = store();
        let a = Task::new("Report", TaskType::Work).unwrap();
        let b = Task::new("Run", TaskType::Movement).unwrap();
        store.add_task(date(2), a.clone()).unwrap();
        store.add_task(date(2), b.clone()).unwrap();
        assert_eq!(store.load(date(2)).unwrap().tasks, vec![a, b]);
    }

    #[test]
    fn result_round_trips_and_is_cleared_on_edit() {
        let (_dir, store) = store();
        let task = Task::new("Report", TaskType::Work).unwrap();
        let plan = store.add_task(date(2), task.clone()).unwrap();

        let config = ScheduleConfig::parse("07:00", "23:00", Intensity::Medium, date(2)).unwrap();
        let result = generate(&plan.tasks, &config);
        store.save_result(date(2), result.clone()).unwrap();
        assert_eq!(store.load(date(2)).unwrap().result, Some(result));

        assert!(store.remove_task(date(2), &task.id).unwrap());
        assert!(store.load(date(2)).unwrap().result.is_none());
        assert!(!store.remove_task(date(2), &task.id).unwrap());
    }

    #[test]
    fn dates_are_sorted_and_skip_foreign_files() {
        let (_dir, store) = store();
        store.save(&DayPlan::new(date(5))).unwrap();
        store.save(&DayPlan::new(date(3))).unwrap();
        std::fs::write(store.dir().join("notes.txt"), "x").unwrap();
        assert_eq!(store.dates().unwrap(), vec![date(3), date(5)]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let (_dir, store) = store();
        std::fs::write(store.dir().join("2026-03-02.json"), "{not json").unwrap();
        assert!(matches!(store.load(date(2)), Err(CoreError::CorruptPlan { .. })));
    }
}
