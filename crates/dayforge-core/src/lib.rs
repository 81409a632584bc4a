//! # Dayforge Core Library
//!
//! Core logic for Dayforge, a single-user day planner. Users list what they
//! want to do today without picking times; the scheduler lays out a full
//! 24-hour timeline in which work is never shortened and everything else
//! compresses under time pressure.
//!
//! ## Architecture
//!
//! - **Scheduler**: a pure, deterministic function from tasks + day
//!   configuration to a contiguous block timeline with tradeoff explanations
//! - **Intensity**: the low/medium/high table controlling how hard non-work
//!   time is squeezed
//! - **Storage**: TOML configuration and per-day JSON plan files, used by the
//!   CLI around the scheduler (never by it)
//! - **Encouragement**: completion messages over an injected random source
//!
//! ## Key Components
//!
//! - [`generate`] / [`DayScheduler`]: schedule generation
//! - [`ScheduleConfig`], [`ScheduleResult`], [`TimeBlock`]: scheduler I/O
//! - [`PlanStore`]: plan persistence
//! - [`Config`]: application configuration

pub mod encouragement;
pub mod error;
pub mod intensity;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod task;

pub use encouragement::encouragement;
pub use error::{ConfigError, CoreError, ValidationError};
pub use intensity::{Intensity, IntensityProfile};
pub use schedule::{ScheduleConfig, ScheduleResult, ScheduleStats, TimeBlock};
pub use scheduler::{generate, DayRules, DayScheduler};
pub use storage::{Config, DayPlan, PlanStore};
pub use task::{Task, TaskType};
