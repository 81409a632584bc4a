mod config;
pub mod plans;

pub use config::{Config, LoggingConfig, PlannerConfig};
pub use plans::{DayPlan, PlanStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `DAYFORGE_DATA_DIR` overrides the location entirely. Otherwise the
/// directory is `~/.config/dayforge[-dev]/`, with `DAYFORGE_ENV=dev`
/// selecting the development one.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYFORGE_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYFORGE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dayforge-dev")
            } else {
                base_dir.join("dayforge")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
