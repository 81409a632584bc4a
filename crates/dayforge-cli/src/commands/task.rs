//! Task management commands for CLI.

use clap::Subcommand;
use dayforge_core::{PlanStore, Task, TaskType};

use super::resolve_date;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a day
    Add {
        /// Task title
        title: String,
        /// Task type: work, essential, movement, phone, social or leisure
        #[arg(long = "type", default_value = "work")]
        task_type: TaskType,
        /// Lower bound of an acceptable work range, in hours
        #[arg(long, requires = "max_hours")]
        min_hours: Option<f64>,
        /// Upper bound of an acceptable work range, in hours
        #[arg(long, requires = "min_hours")]
        max_hours: Option<f64>,
        /// Day to add to (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List a day's tasks
    List {
        /// Day to list (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
        /// Day the task belongs to (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn describe(task: &Task) -> String {
    match task.hour_range() {
        Some((min, max)) => format!(
            "{}  [{}] {}-{}h  {}",
            task.id, task.task_type, min, max, task.title
        ),
        None => format!(
            "{}  [{}] {} min  {}",
            task.id, task.task_type, task.estimated_minutes, task.title
        ),
    }
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PlanStore::open_default()?;

    match action {
        TaskAction::Add {
            title,
            task_type,
            min_hours,
            max_hours,
            date,
        } => {
            let date = resolve_date(date.as_deref())?;
            let mut task = Task::new(title, task_type)?;
            if let (Some(min), Some(max)) = (min_hours, max_hours) {
                task = task.with_hour_range(min, max)?;
            }
            store.add_task(date, task.clone())?;
            println!("Task added: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { date, json } => {
            let date = resolve_date(date.as_deref())?;
            let plan = store.load(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan.tasks)?);
            } else if plan.tasks.is_empty() {
                println!("No tasks for {date}");
            } else {
                for task in &plan.tasks {
                    println!("{}", describe(task));
                }
            }
        }
        TaskAction::Remove { id, date } => {
            let date = resolve_date(date.as_deref())?;
            if !store.remove_task(date, &id)? {
                return Err(format!("task not found: {id}").into());
            }
            println!("Task removed: {id}");
        }
    }
    Ok(())
}
