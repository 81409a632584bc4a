pub mod cheer;
pub mod config;
pub mod plan;
pub mod task;

use chrono::{Local, NaiveDate};
use dayforge_core::schedule::parse_date;
use dayforge_core::ValidationError;

/// `--date` value, or today in local time.
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate, ValidationError> {
    match date {
        Some(value) => parse_date(value),
        None => Ok(Local::now().date_naive()),
    }
}
