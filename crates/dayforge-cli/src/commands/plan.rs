//! Plan generation and display.

use clap::Subcommand;
use dayforge_core::schedule::parse_time_of_day;
use dayforge_core::{generate, Config, Intensity, PlanStore, ScheduleConfig, ScheduleResult};
use tracing::debug;

use super::resolve_date;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate the timeline for a day from its tasks
    Generate {
        /// Day to plan (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// low, medium or high (default: from config)
        #[arg(long)]
        intensity: Option<Intensity>,
        /// Wake time, HH:mm (default: from config)
        #[arg(long)]
        wake: Option<String>,
        /// Target sleep time, HH:mm (default: from config)
        #[arg(long)]
        sleep: Option<String>,
        /// Print JSON instead of a timeline
        #[arg(long)]
        json: bool,
    },
    /// Show the last generated timeline for a day
    Show {
        /// Day to show (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Print JSON instead of a timeline
        #[arg(long)]
        json: bool,
    },
}

fn print_result(result: &ScheduleResult) {
    for block in &result.blocks {
        let reduced = match block.original_minutes {
            Some(original) if block.is_reduced => format!("  (reduced from {original} min)"),
            _ => String::new(),
        };
        println!(
            "{}-{}  {:<10} {}{}",
            block.start.format("%H:%M"),
            block.end.format("%H:%M"),
            block.block_type.as_str(),
            block.label,
            reduced
        );
    }

    if !result.tradeoffs.is_empty() {
        println!();
        println!("Tradeoffs:");
        for tradeoff in &result.tradeoffs {
            println!("  - {tradeoff}");
        }
    }
    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  ! {warning}");
        }
    }

    let stats = &result.stats;
    println!();
    println!(
        "Work {} min | Breaks {} min | Phone {} min | Leisure {} min | Sleep {:.1}h{}",
        stats.work_minutes,
        stats.break_minutes,
        stats.phone_minutes,
        stats.leisure_minutes,
        stats.sleep_hours,
        if stats.sleep_reduced { " (reduced)" } else { "" }
    );
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PlanStore::open_default()?;

    match action {
        PlanAction::Generate {
            date,
            intensity,
            wake,
            sleep,
            json,
        } => {
            let date = resolve_date(date.as_deref())?;
            // Stored times are only parsed when no flag replaces them.
            let planner = Config::load_or_default().planner;
            let config = ScheduleConfig::new(
                parse_time_of_day(wake.as_deref().unwrap_or(&planner.wake))?,
                parse_time_of_day(sleep.as_deref().unwrap_or(&planner.sleep))?,
                intensity.unwrap_or(planner.intensity),
                date,
            );

            let plan = store.load(date)?;
            debug!(%date, tasks = plan.tasks.len(), store = %store.dir().display(), "generating plan");
            let result = generate(&plan.tasks, &config);
            store.save_result(date, result.clone())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Plan for {date} ({} intensity)", config.intensity.label());
                println!();
                print_result(&result);
            }
        }
        PlanAction::Show { date, json } => {
            let date = resolve_date(date.as_deref())?;
            let plan = store.load(date)?;
            let Some(result) = plan.result else {
                return Err(format!("no plan generated for {date}; run `dayforge plan generate`").into());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
    }
    Ok(())
}
