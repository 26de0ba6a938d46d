//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::Path;

use examfill_core::models::config::ExamfillConfig;

/// Load configuration from an explicit path, the default location, or
/// fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ExamfillConfig> {
    if let Some(path) = config_path {
        return Ok(ExamfillConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(ExamfillConfig::from_file(&default_path)?)
    } else {
        Ok(ExamfillConfig::default())
    }
}
